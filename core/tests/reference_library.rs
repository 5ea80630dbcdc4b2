use cockpit_core::checklists::flatten::flatten_steps;
use cockpit_core::checklists::render::{Availability, ChecklistView, NO_CHECKLIST_AVAILABLE};
use cockpit_core::checklists::resolver::resolve_checklist;
use cockpit_core::library::config::LibraryConfig;
use cockpit_core::library::{sha256_hex, ReferenceLibrary};
use serde_json::json;
use std::fs;

fn alert_bytes() -> Vec<u8> {
    serde_json::to_vec(&json!([
        {"uid": 1, "category": "abnormal", "action": "simulate", "alertType": "cas", "message": "OIL PX LOW"},
        {"uid": 2, "category": "abnormal", "action": "simulate", "alertType": "cas", "message": "FUEL IMBALANCE"},
        {"uid": 3, "category": "emergency", "action": "simulate", "alertType": "situation", "message": "Smoke and Fume Elimination"},
        {"uid": 4, "category": "normal", "action": "review", "alertType": "situation"}
    ]))
    .unwrap()
}

fn checklist_bytes() -> Vec<u8> {
    serde_json::to_vec(&json!([
        {
            "id": "oil",
            "title": "Low Oil Pressure",
            "section": "ABNORMAL",
            "cas": "OIL PX LOW",
            "steps": [
                {"id": "1", "instruction": "Throttle", "action": "REDUCE", "is_conditional": false, "indent_level": 0, "step_number": "1", "sub_steps": []},
                {"id": "2", "instruction": "If pressure stays low", "action": "", "is_conditional": true, "indent_level": 0, "step_number": "2", "sub_steps": []}
            ]
        },
        {
            "id": "oil-duplicate",
            "title": "Low Oil Pressure (alternate)",
            "section": "ABNORMAL",
            "cas": "OIL PX LOW",
            "steps": [
                {"id": "1", "instruction": "Land", "action": "IMMEDIATELY", "is_conditional": false, "indent_level": 0, "step_number": "1", "sub_steps": []}
            ]
        },
        {
            "id": "fuel",
            "title": "Fuel Imbalance",
            "section": "ABNORMAL",
            "alert_message": "Fuel Imbalance",
            "steps": []
        }
    ]))
    .unwrap()
}

fn library() -> ReferenceLibrary {
    ReferenceLibrary::from_bytes(&alert_bytes(), &checklist_bytes())
}

#[test]
fn alert_resolves_and_flattens_in_document_order() {
    let lib = library();
    let alert = lib.catalog().find_by_identifier("1-AB-CAS-OIL PX LOW").unwrap();
    let entry = resolve_checklist(alert.message.as_deref(), lib.checklists().entries()).unwrap();
    assert_eq!(entry.id, "oil");

    let flat = flatten_steps(entry);
    assert_eq!(flat.len(), 2);
    assert_eq!(flat[0].instruction, "Throttle");
    assert_eq!(flat[0].effective_indent, 0);
    assert_eq!(flat[0].display_action(), Some("REDUCE"));
    assert_eq!(flat[1].instruction, "If pressure stays low");
    assert_eq!(flat[1].effective_indent, 0);
    assert!(flat[1].is_conditional);
    assert_eq!(flat[1].display_action(), None);
}

#[test]
fn view_for_identifier_uses_first_matching_entry() {
    let lib = library();
    let view = lib.view_for_identifier("1-AB-CAS-OIL PX LOW").unwrap();
    assert_eq!(view.availability, Availability::AVAILABLE);
    assert_eq!(view.title, "Low Oil Pressure");
    assert_eq!(view.checklist_id.as_deref(), Some("oil"));
    assert_eq!(view.fallback_text(), None);
}

#[test]
fn empty_checklist_and_missing_checklist_share_fallback() {
    let lib = library();

    let empty = lib.view_for_identifier("2-AB-CAS-FUEL IMBALANCE").unwrap();
    assert_eq!(empty.availability, Availability::EMPTY_CHECKLIST);
    assert_eq!(empty.checklist_id.as_deref(), Some("fuel"));
    assert!(empty.steps.is_empty());

    let missing = lib
        .view_for_identifier("3-EM-SITU-Smoke and Fume Elimination")
        .unwrap();
    assert_eq!(missing.availability, Availability::NO_MATCHING_ENTRY);
    assert_eq!(missing.title, "Emergency Situation");
    assert!(missing.steps.is_empty());

    assert_eq!(empty.fallback_text(), Some(NO_CHECKLIST_AVAILABLE));
    assert_eq!(missing.fallback_text(), empty.fallback_text());
}

#[test]
fn alert_without_message_never_matches() {
    let lib = library();
    let alert = lib.catalog().find_by_identifier("4-NM-SITU").unwrap();
    assert!(lib.checklist_for_alert(alert).is_none());
    let view = ChecklistView::for_alert(alert, lib.checklists().entries());
    assert_eq!(view.availability, Availability::NO_MATCHING_ENTRY);
}

#[test]
fn unknown_identifier_has_no_view() {
    assert!(library().view_for_identifier("99-AB-CAS-OIL PX LOW").is_none());
}

#[test]
fn each_dataset_degrades_independently() {
    let lib = ReferenceLibrary::from_bytes(b"not json", &checklist_bytes());
    assert!(lib.catalog().is_empty());
    assert!(lib.alerts_fingerprint().is_none());
    assert_eq!(lib.checklists().len(), 3);

    let fp = lib.checklists_fingerprint().unwrap();
    assert_eq!(fp.record_count, 3);
    assert_eq!(fp.sha256, sha256_hex(&checklist_bytes()));

    let lib = ReferenceLibrary::from_bytes(&alert_bytes(), b"");
    assert_eq!(lib.catalog().len(), 4);
    assert!(lib.checklists().is_empty());
    let view = lib.view_for_identifier("1-AB-CAS-OIL PX LOW").unwrap();
    assert_eq!(view.availability, Availability::NO_MATCHING_ENTRY);
}

#[test]
fn concurrent_loads_agree() {
    let alerts = alert_bytes();
    let checklists = checklist_bytes();
    let (alerts, checklists) = (&alerts, &checklists);
    let views: Vec<ChecklistView> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(move || {
                    ReferenceLibrary::from_bytes(alerts, checklists)
                        .view_for_identifier("1-AB-CAS-OIL PX LOW")
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(views.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn open_reads_datasets_named_by_config_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("alerts.json"), alert_bytes()).unwrap();
    fs::write(temp.path().join("checklists.json"), checklist_bytes()).unwrap();
    let cfg_path = temp.path().join("library.json");
    fs::write(
        &cfg_path,
        serde_json::to_vec(&json!({
            "alerts_path": "alerts.json",
            "checklists_path": "checklists.json"
        }))
        .unwrap(),
    )
    .unwrap();

    let cfg = LibraryConfig::from_json_file(&cfg_path).unwrap();
    assert_eq!(cfg.alerts_path, temp.path().join("alerts.json"));

    let lib = ReferenceLibrary::open(&cfg);
    assert_eq!(lib.catalog().len(), 4);
    assert_eq!(lib.checklists().len(), 3);
    assert_eq!(
        lib.alerts_fingerprint().unwrap().sha256,
        sha256_hex(&alert_bytes())
    );
}

#[test]
fn open_with_missing_files_yields_empty_library() {
    let temp = tempfile::tempdir().unwrap();
    let cfg = LibraryConfig {
        alerts_path: temp.path().join("nope.json"),
        checklists_path: temp.path().join("nope_either.json"),
    };
    let lib = ReferenceLibrary::open(&cfg);
    assert!(lib.catalog().is_empty());
    assert!(lib.checklists().is_empty());
}

#[test]
fn config_with_blank_path_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let cfg_path = temp.path().join("library.json");
    fs::write(
        &cfg_path,
        br#"{"alerts_path": "", "checklists_path": "checklists.json"}"#,
    )
    .unwrap();
    let err = LibraryConfig::from_json_file(&cfg_path).unwrap_err();
    assert!(err.to_string().contains("invalid input"));
}
