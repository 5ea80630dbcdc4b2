use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistStep {
    pub id: String,
    pub instruction: String,
    /// Empty when the step has no action line.
    pub action: String,
    pub is_conditional: bool,
    /// Relative to the parent step, not absolute.
    pub indent_level: i32,
    #[serde(default)]
    pub step_number: Option<String>,
    #[serde(default)]
    pub sub_steps: Vec<ChecklistStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub id: String,
    pub title: String,
    pub section: String,
    #[serde(default)]
    pub subsection: Option<String>,
    #[serde(default)]
    pub cas: Option<String>,
    #[serde(default)]
    pub cas_type: Option<String>,
    #[serde(default)]
    pub cas_description: Option<String>,
    /// Text shown in the PFD alerts window for this checklist.
    #[serde(default)]
    pub alert_message: Option<String>,
    #[serde(default)]
    pub steps: Vec<ChecklistStep>,
}

impl ChecklistEntry {
    /// Number of steps in the tree, nested ones included.
    pub fn step_count(&self) -> usize {
        fn count(steps: &[ChecklistStep]) -> usize {
            steps.iter().map(|s| 1 + count(&s.sub_steps)).sum()
        }
        count(&self.steps)
    }
}
