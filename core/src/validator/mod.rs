pub mod checks;

use crate::alerts::catalog::duplicate_identifiers;
use crate::alerts::identity::unique_identifier;
use crate::checklists::model::{ChecklistEntry, ChecklistStep};
use crate::checklists::resolver::matching_entries;
use crate::library::{DatasetFingerprint, ReferenceLibrary};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub severity: String,
    pub result: String, // PASS|FAIL
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub checks_version: String,
    pub alerts: Option<DatasetFingerprint>,
    pub checklists: Option<DatasetFingerprint>,
    pub overall: String, // PASS|FAIL
    pub checks: Vec<CheckResult>,
}

impl ValidationSummary {
    pub fn result_for_check(&self, check_id: &str) -> (String, String) {
        for c in &self.checks {
            if c.check_id == check_id {
                return (c.result.clone(), c.message.clone());
            }
        }
        (
            "FAIL".to_string(),
            format!("missing check result for {}", check_id),
        )
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> + '_ {
        self.checks.iter().filter(|c| c.result != "PASS")
    }
}

pub struct DatasetValidator {
    catalog: checks::CheckCatalog,
}

impl DatasetValidator {
    pub fn new_v1() -> Self {
        Self {
            catalog: checks::dataset_checks_v1(),
        }
    }

    pub fn validate(&self, library: &ReferenceLibrary) -> ValidationSummary {
        let alerts = library.catalog().alerts();
        let entries = library.checklists().entries();

        let mut checks_out: Vec<CheckResult> = Vec::new();

        // CHK.ALERTS.UNIQUE_IDENTIFIERS
        let dup_ids = duplicate_identifiers(alerts);
        checks_out.push(self.outcome(
            "CHK.ALERTS.UNIQUE_IDENTIFIERS",
            &dup_ids,
            "duplicate identifiers",
        ));

        // CHK.ALERTS.UNIQUE_UIDS
        let mut seen_uids = BTreeSet::new();
        let dup_uids: BTreeSet<String> = alerts
            .iter()
            .filter(|a| !seen_uids.insert(a.uid))
            .map(|a| a.uid.to_string())
            .collect();
        checks_out.push(self.outcome(
            "CHK.ALERTS.UNIQUE_UIDS",
            &dup_uids.into_iter().collect::<Vec<_>>(),
            "duplicate uids",
        ));

        // CHK.CHECKLISTS.REQUIRED_TEXT
        let mut missing_text = Vec::new();
        for e in entries {
            if e.title.trim().is_empty() {
                missing_text.push(format!("{} (title)", e.id));
            }
            if e.section.trim().is_empty() {
                missing_text.push(format!("{} (section)", e.id));
            }
        }
        checks_out.push(self.outcome(
            "CHK.CHECKLISTS.REQUIRED_TEXT",
            &missing_text,
            "missing",
        ));

        // CHK.CHECKLISTS.HAS_STEPS
        let no_steps: Vec<String> = entries
            .iter()
            .filter(|e| e.steps.is_empty())
            .map(entry_label)
            .collect();
        checks_out.push(self.outcome("CHK.CHECKLISTS.HAS_STEPS", &no_steps, "no steps"));

        // CHK.STEPS.INSTRUCTION_PRESENT and CHK.STEPS.INDENT_CONSISTENCY
        let mut blank = Vec::new();
        let mut misindented = Vec::new();
        for e in entries {
            scan_steps(e, &e.steps, &mut blank, &mut misindented);
        }
        checks_out.push(self.outcome(
            "CHK.STEPS.INSTRUCTION_PRESENT",
            &blank,
            "blank instruction",
        ));
        checks_out.push(self.outcome(
            "CHK.STEPS.INDENT_CONSISTENCY",
            &misindented,
            "sub-steps not deeper than parent",
        ));

        // CHK.CHECKLISTS.CAS_FORMAT
        checks_out.push(self.check_cas_format(entries));

        // CHK.XREF.SIMULATE_COVERAGE and CHK.XREF.AMBIGUOUS_MATCHES
        let mut uncovered = Vec::new();
        let mut ambiguous: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for alert in library.catalog().simulatable() {
            if alert.message.is_none() {
                continue;
            }
            if !library.view_for_alert(alert).is_available() {
                uncovered.push(unique_identifier(alert));
            }
        }
        for alert in alerts {
            let hits = matching_entries(alert.message.as_deref(), entries);
            if hits.len() > 1 {
                ambiguous.insert(
                    unique_identifier(alert),
                    hits.iter().map(|e| e.id.clone()).collect(),
                );
            }
        }
        checks_out.push(self.outcome(
            "CHK.XREF.SIMULATE_COVERAGE",
            &uncovered,
            "no checklist for",
        ));
        let ambiguous: Vec<String> = ambiguous
            .into_iter()
            .map(|(id, hits)| format!("{} -> [{}]", id, hits.join(", ")))
            .collect();
        checks_out.push(self.outcome(
            "CHK.XREF.AMBIGUOUS_MATCHES",
            &ambiguous,
            "first entry used for",
        ));

        let overall = if checks_out
            .iter()
            .any(|c| c.severity == "BLOCKER" && c.result != "PASS")
        {
            "FAIL"
        } else {
            "PASS"
        };

        ValidationSummary {
            checks_version: self.catalog.checks_version.clone(),
            alerts: library.alerts_fingerprint().cloned(),
            checklists: library.checklists_fingerprint().cloned(),
            overall: overall.to_string(),
            checks: checks_out,
        }
    }

    fn check_cas_format(&self, entries: &[ChecklistEntry]) -> CheckResult {
        let re = match Regex::new(r"^[A-Z][A-Z0-9 ]+$") {
            Ok(re) => re,
            Err(e) => {
                return self.result(
                    "CHK.CHECKLISTS.CAS_FORMAT",
                    "FAIL",
                    format!("invalid CAS pattern: {}", e),
                )
            }
        };
        let bad: Vec<String> = entries
            .iter()
            .filter_map(|e| e.cas.as_deref().map(|cas| (e, cas)))
            .filter(|(_, cas)| !re.is_match(cas))
            .map(|(e, cas)| format!("{} ({:?})", entry_label(e), cas))
            .collect();
        self.outcome("CHK.CHECKLISTS.CAS_FORMAT", &bad, "malformed CAS")
    }

    fn outcome(&self, check_id: &str, offenders: &[String], label: &str) -> CheckResult {
        if offenders.is_empty() {
            self.result(check_id, "PASS", "ok".to_string())
        } else {
            self.result(
                check_id,
                "FAIL",
                format!("{}: {}", label, offenders.join("; ")),
            )
        }
    }

    fn result(&self, check_id: &str, result: &str, message: String) -> CheckResult {
        CheckResult {
            check_id: check_id.to_string(),
            severity: self
                .catalog
                .severity_of(check_id)
                .unwrap_or("MAJOR")
                .to_string(),
            result: result.to_string(),
            message,
        }
    }
}

fn entry_label(entry: &ChecklistEntry) -> String {
    format!("{} '{}'", entry.id, entry.title)
}

fn scan_steps(
    entry: &ChecklistEntry,
    steps: &[ChecklistStep],
    blank: &mut Vec<String>,
    misindented: &mut Vec<String>,
) {
    for step in steps {
        let step_label = step.step_number.as_deref().unwrap_or(&step.id);
        if step.instruction.trim().is_empty() {
            blank.push(format!("{} step {}", entry_label(entry), step_label));
        }
        if step
            .sub_steps
            .iter()
            .any(|sub| sub.indent_level <= step.indent_level)
        {
            misindented.push(format!("{} step {}", entry_label(entry), step_label));
        }
        scan_steps(entry, &step.sub_steps, blank, misindented);
    }
}
