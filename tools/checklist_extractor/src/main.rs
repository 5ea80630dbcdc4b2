use cockpit_core::alerts::catalog::AlertCatalog;
use cockpit_core::checklists::document::ChecklistDocument;
use cockpit_core::checklists::extract::ChecklistExtractor;
use cockpit_core::library::ReferenceLibrary;
use cockpit_core::validator::DatasetValidator;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: checklist_extractor <checklists.txt> <checklists.json>");
        std::process::exit(2);
    }

    let text = match std::fs::read_to_string(&args[1]) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("read error: {}: {}", args[1], e);
            std::process::exit(2);
        }
    };
    let extractor = match ChecklistExtractor::new() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("extractor error: {}", e);
            std::process::exit(1);
        }
    };
    let extraction = extractor.extract(&text);

    let json = match serde_json::to_vec_pretty(&extraction.entries) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("serialize error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&args[2], json) {
        eprintln!("write error: {}: {}", args[2], e);
        std::process::exit(1);
    }

    let doc = ChecklistDocument::new(extraction.entries);
    let library = ReferenceLibrary::new(AlertCatalog::default(), doc);
    let summary = DatasetValidator::new_v1().validate(&library);
    for c in summary.failed_checks() {
        tracing::warn!(check = %c.check_id, severity = %c.severity, "{}", c.message);
    }

    match serde_json::to_string_pretty(&extraction.stats) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("serialize error: {}", e);
            std::process::exit(1);
        }
    }
    if summary.overall == "PASS" {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
