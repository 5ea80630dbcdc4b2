use cockpit_core::library::config::LibraryConfig;
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
    let cfg = match args.get(1).map(String::as_str) {
        Some("--config") if args.len() == 3 => match LibraryConfig::from_json_file(&args[2]) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("config error: {}", e);
                std::process::exit(2);
            }
        },
        Some(_) if args.len() == 3 => LibraryConfig {
            alerts_path: args[1].clone().into(),
            checklists_path: args[2].clone().into(),
        },
        _ => {
            eprintln!("usage: dataset_validator <alerts.json> <checklists.json>");
            eprintln!("       dataset_validator --config <library.json>");
            std::process::exit(2);
        }
    };

    let library = ReferenceLibrary::open(&cfg);
    if library.alerts_fingerprint().is_none() || library.checklists_fingerprint().is_none() {
        tracing::error!(
            alerts = %cfg.alerts_path.display(),
            checklists = %cfg.checklists_path.display(),
            "one or both datasets failed to load"
        );
    }

    let summary = DatasetValidator::new_v1().validate(&library);
    match serde_json::to_string_pretty(&summary) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("validator error: {}", e);
            std::process::exit(1);
        }
    }
    for c in summary.failed_checks() {
        tracing::warn!(check = %c.check_id, severity = %c.severity, "{}", c.message);
    }

    let loaded =
        library.alerts_fingerprint().is_some() && library.checklists_fingerprint().is_some();
    if loaded && summary.overall == "PASS" {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
