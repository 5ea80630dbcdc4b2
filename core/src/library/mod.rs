pub mod config;

use crate::alerts::catalog::AlertCatalog;
use crate::alerts::model::Alert;
use crate::checklists::document::ChecklistDocument;
use crate::checklists::model::ChecklistEntry;
use crate::checklists::render::ChecklistView;
use crate::checklists::resolver::resolve_checklist;
use crate::library::config::LibraryConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetFingerprint {
    pub sha256: String,
    pub record_count: usize,
}

impl DatasetFingerprint {
    pub fn of(bytes: &[u8], record_count: usize) -> Self {
        Self {
            sha256: sha256_hex(bytes),
            record_count,
        }
    }
}

/// Both reference datasets, loaded once by the host and passed by reference
/// to every lookup. Nothing in here changes after construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    catalog: AlertCatalog,
    checklists: ChecklistDocument,
    alerts_fingerprint: Option<DatasetFingerprint>,
    checklists_fingerprint: Option<DatasetFingerprint>,
}

impl ReferenceLibrary {
    pub fn new(catalog: AlertCatalog, checklists: ChecklistDocument) -> Self {
        Self {
            catalog,
            checklists,
            alerts_fingerprint: None,
            checklists_fingerprint: None,
        }
    }

    /// Each dataset degrades to empty on its own if it fails to parse. A
    /// degraded dataset carries no fingerprint.
    pub fn from_bytes(alert_bytes: &[u8], checklist_bytes: &[u8]) -> Self {
        let (catalog, alerts_fingerprint) = AlertCatalog::from_bytes_or_empty(alert_bytes);
        let (checklists, checklists_fingerprint) =
            ChecklistDocument::from_bytes_or_empty(checklist_bytes);
        tracing::info!(
            alerts = catalog.len(),
            checklists = checklists.len(),
            "reference library loaded"
        );
        Self {
            catalog,
            checklists,
            alerts_fingerprint,
            checklists_fingerprint,
        }
    }

    pub fn open(cfg: &LibraryConfig) -> Self {
        let alert_bytes = read_or_empty(&cfg.alerts_path);
        let checklist_bytes = read_or_empty(&cfg.checklists_path);
        Self::from_bytes(&alert_bytes, &checklist_bytes)
    }

    pub fn catalog(&self) -> &AlertCatalog {
        &self.catalog
    }

    pub fn checklists(&self) -> &ChecklistDocument {
        &self.checklists
    }

    pub fn alerts_fingerprint(&self) -> Option<&DatasetFingerprint> {
        self.alerts_fingerprint.as_ref()
    }

    pub fn checklists_fingerprint(&self) -> Option<&DatasetFingerprint> {
        self.checklists_fingerprint.as_ref()
    }

    pub fn checklist_for_alert(&self, alert: &Alert) -> Option<&ChecklistEntry> {
        resolve_checklist(alert.message.as_deref(), self.checklists.entries())
    }

    pub fn view_for_alert(&self, alert: &Alert) -> ChecklistView {
        ChecklistView::for_alert(alert, self.checklists.entries())
    }

    /// `None` only when no alert carries `identifier`.
    pub fn view_for_identifier(&self, identifier: &str) -> Option<ChecklistView> {
        self.catalog
            .find_by_identifier(identifier)
            .map(|alert| self.view_for_alert(alert))
    }
}

fn read_or_empty(path: &Path) -> Vec<u8> {
    match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "dataset file unreadable");
            Vec::new()
        }
    }
}
