use crate::checklists::model::{ChecklistEntry, ChecklistStep};
use serde::{Deserialize, Serialize};

/// One render-ready checklist line with its indent resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatStep {
    pub instruction: String,
    pub action: String,
    pub is_conditional: bool,
    pub effective_indent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_number: Option<String>,
}

impl FlatStep {
    /// `None` when the step has no action line to draw.
    pub fn display_action(&self) -> Option<&str> {
        if self.action.is_empty() {
            None
        } else {
            Some(&self.action)
        }
    }
}

/// Pre-order walk of `steps`. Each step is emitted at
/// `indent_level + parent_offset`; its children are walked with
/// `indent_level + parent_offset + 1` and spliced in right after it.
/// Indents saturate at the `i32` bounds.
pub fn flatten(steps: &[ChecklistStep], parent_offset: i32) -> Vec<FlatStep> {
    let mut out = Vec::new();
    flatten_into(steps, parent_offset, &mut out);
    out
}

fn flatten_into(steps: &[ChecklistStep], parent_offset: i32, out: &mut Vec<FlatStep>) {
    for step in steps {
        let effective_indent = step.indent_level.saturating_add(parent_offset);
        out.push(FlatStep {
            instruction: step.instruction.clone(),
            action: step.action.clone(),
            is_conditional: step.is_conditional,
            effective_indent,
            step_number: step.step_number.clone(),
        });
        if !step.sub_steps.is_empty() {
            flatten_into(&step.sub_steps, effective_indent.saturating_add(1), out);
        }
    }
}

pub fn flatten_steps(entry: &ChecklistEntry) -> Vec<FlatStep> {
    flatten(&entry.steps, 0)
}
