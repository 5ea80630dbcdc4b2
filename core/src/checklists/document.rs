use crate::checklists::model::ChecklistEntry;
use crate::error::{CoreError, CoreResult};
use crate::library::DatasetFingerprint;

/// Parse the checklist document (a JSON array of entries).
///
/// A step missing a required field fails the whole document.
pub fn load_checklists(bytes: &[u8]) -> CoreResult<Vec<ChecklistEntry>> {
    let entries: Vec<ChecklistEntry> = serde_json::from_slice(bytes).map_err(|e| {
        CoreError::Parse(format!("Failed to parse checklist document: {}", e))
    })?;
    tracing::debug!(count = entries.len(), "loaded checklist document");
    Ok(entries)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistDocument {
    entries: Vec<ChecklistEntry>,
}

impl ChecklistDocument {
    pub fn new(entries: Vec<ChecklistEntry>) -> Self {
        Self { entries }
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        Ok(Self::new(load_checklists(bytes)?))
    }

    pub fn from_bytes_or_empty(bytes: &[u8]) -> (Self, Option<DatasetFingerprint>) {
        match Self::from_bytes(bytes) {
            Ok(doc) => {
                let fp = DatasetFingerprint::of(bytes, doc.len());
                (doc, Some(fp))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "checklist document unavailable, continuing with no checklists"
                );
                (Self::default(), None)
            }
        }
    }

    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ChecklistEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
