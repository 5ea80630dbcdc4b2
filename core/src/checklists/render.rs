use crate::alerts::identity::alert_title;
use crate::alerts::model::Alert;
use crate::checklists::flatten::{flatten_steps, FlatStep};
use crate::checklists::model::ChecklistEntry;
use crate::checklists::resolver::resolve_checklist;
use serde::{Deserialize, Serialize};

pub const NO_CHECKLIST_AVAILABLE: &str = "No checklist available";

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    AVAILABLE,
    NO_MATCHING_ENTRY,
    EMPTY_CHECKLIST,
}

/// What the presentation layer draws for one alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistView {
    pub title: String,
    pub availability: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist_id: Option<String>,
    pub steps: Vec<FlatStep>,
}

impl ChecklistView {
    pub fn for_alert(alert: &Alert, entries: &[ChecklistEntry]) -> Self {
        match resolve_checklist(alert.message.as_deref(), entries) {
            Some(entry) => Self::for_entry(entry),
            None => Self {
                title: alert_title(alert),
                availability: Availability::NO_MATCHING_ENTRY,
                checklist_id: None,
                steps: vec![],
            },
        }
    }

    pub fn for_entry(entry: &ChecklistEntry) -> Self {
        let steps = flatten_steps(entry);
        let availability = if steps.is_empty() {
            Availability::EMPTY_CHECKLIST
        } else {
            Availability::AVAILABLE
        };
        Self {
            title: entry.title.clone(),
            availability,
            checklist_id: Some(entry.id.clone()),
            steps,
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::AVAILABLE
    }

    /// Both unavailable states show the same text.
    pub fn fallback_text(&self) -> Option<&'static str> {
        if self.is_available() {
            None
        } else {
            Some(NO_CHECKLIST_AVAILABLE)
        }
    }
}
