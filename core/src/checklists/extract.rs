use crate::checklists::model::{ChecklistEntry, ChecklistStep};
use crate::error::{CoreError, CoreResult};
use crate::library::sha256_hex;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines_processed: usize,
    pub checklists: usize,
    pub steps: usize,
    /// Checklists with no steps are not emitted.
    pub dropped_checklists: usize,
    /// Indented steps with no parent one level up, kept at top level.
    pub orphan_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub entries: Vec<ChecklistEntry>,
    pub stats: ExtractStats,
}

/// Line-oriented parser for the plain-text checklist book.
///
/// Recognized lines:
/// - `#SECTION`, `##Subsection` and `###Checklist title` headers
/// - `1. text ... ACTION`, `a. text ... ACTION` and `(1) text ... ACTION` steps
/// - all-caps CAS lines, optionally followed by `Caution` or `Advisory`
/// - `PFD Alerts Window: "text"`
///
/// Anything else continues the previous step.
pub struct ChecklistExtractor {
    section: Regex,
    subsection: Regex,
    title: Regex,
    item: Regex,
    cas: Regex,
    pfd_alert: Regex,
    dotted: Regex,
}

#[derive(Default)]
struct Pending {
    cas: Option<String>,
    cas_type: Option<String>,
    pfd_alert: Option<String>,
}

impl ChecklistExtractor {
    pub fn new() -> CoreResult<Self> {
        let re = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| CoreError::InvalidInput(format!("bad extractor pattern: {}", e)))
        };
        Ok(Self {
            section: re(r"^#([A-Z][A-Z0-9 ]+)$")?,
            subsection: re(r"^##([A-Z].+)$")?,
            title: re(r"^###(.+)$")?,
            item: re(r"^(\s*)(?:(\d+)\.|\((\d+)\)|([a-z])\.)\s+(.+?)(?:\.\.\.\s*(.+))?$")?,
            cas: re(r"^([A-Z][A-Z0-9 ]+?)(?:\s+(Caution|Advisory))?$")?,
            pfd_alert: re(r#"^PFD Alerts Window: ["“]([^"”]+)["”]$"#)?,
            dotted: re(r"\.{2,}")?,
        })
    }

    fn starts_block(&self, line: &str) -> bool {
        self.section.is_match(line)
            || self.subsection.is_match(line)
            || self.title.is_match(line)
            || self.item.is_match(line)
            || self.cas.is_match(line)
            || self.pfd_alert.is_match(line)
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        let mut stats = ExtractStats {
            lines_processed: lines.len(),
            ..ExtractStats::default()
        };
        let mut entries: Vec<ChecklistEntry> = Vec::new();
        let mut current: Option<ChecklistEntry> = None;
        let mut section: Option<String> = None;
        let mut subsection: Option<String> = None;
        let mut pending = Pending::default();
        let mut step_counter = 0usize;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            i += 1;
            if line.is_empty() {
                continue;
            }

            if let Some(c) = self.section.captures(line) {
                section = Some(c[1].to_string());
                continue;
            }
            // `###` also matches the subsection pattern, so titles go first.
            if let Some(c) = self.title.captures(line) {
                self.finish(current.take(), &mut entries, &mut stats);
                let title = c[1].trim().to_string();
                let section = section.clone().unwrap_or_default();
                let ordinal = entries.len() + stats.dropped_checklists;
                let id = format!(
                    "c_{}",
                    &sha256_hex(format!("{}:{}:{}", ordinal, section, title).as_bytes())[..16]
                );
                let pending = std::mem::take(&mut pending);
                current = Some(ChecklistEntry {
                    id,
                    title,
                    section,
                    subsection: subsection.clone(),
                    cas: pending.cas,
                    cas_type: pending.cas_type,
                    cas_description: None,
                    alert_message: pending.pfd_alert,
                    steps: vec![],
                });
                step_counter = 0;
                continue;
            }
            if let Some(c) = self.subsection.captures(line) {
                subsection = Some(c[1].to_string());
                continue;
            }

            if let Some(c) = self.pfd_alert.captures(line) {
                let text = c[1].trim().to_string();
                match current.as_mut() {
                    Some(entry) => entry.alert_message = Some(text),
                    None => pending.pfd_alert = Some(text),
                }
                continue;
            }

            if let Some(c) = self.cas.captures(line) {
                let code = c[1].trim().to_string();
                let mut cas_type = c.get(2).map(|m| m.as_str().to_string());
                if cas_type.is_none() {
                    if let Some(next) = lines.get(i).map(|l| l.trim()) {
                        if next == code {
                            i += 1;
                        } else if next.contains("Caution") {
                            cas_type = Some("Caution".to_string());
                            i += 1;
                        } else if next.contains("Advisory") {
                            cas_type = Some("Advisory".to_string());
                            i += 1;
                        }
                    }
                }
                match current.as_mut() {
                    Some(entry) => {
                        entry.cas = Some(code);
                        entry.cas_type = cas_type;
                    }
                    None => {
                        pending.cas = Some(code);
                        pending.cas_type = cas_type;
                    }
                }
                continue;
            }

            let Some(entry) = current.as_mut() else {
                continue;
            };
            let Some(c) = self.item.captures(line) else {
                continue;
            };

            let mut instruction = c[5].trim().to_string();
            let mut action = c.get(6).map(|m| m.as_str().trim().to_string()).unwrap_or_default();

            // Continuation lines run until the next recognized line.
            while let Some(next) = lines.get(i) {
                if next.is_empty() {
                    i += 1;
                    continue;
                }
                if self.starts_block(next) {
                    break;
                }
                match next.split_once("...") {
                    Some((lead, rest)) => {
                        if !lead.trim().is_empty() {
                            instruction.push(' ');
                            instruction.push_str(lead.trim());
                        }
                        let rest = rest.trim();
                        if action.is_empty() {
                            action = rest.to_string();
                        } else {
                            action.push(' ');
                            action.push_str(rest);
                        }
                    }
                    None => {
                        instruction.push(' ');
                        instruction.push_str(next.trim());
                    }
                }
                i += 1;
            }

            let action = self.clean_action(&action);
            let (indent_level, step_number) = if let Some(n) = c.get(2) {
                (0, n.as_str().to_string())
            } else if let Some(n) = c.get(3) {
                (2, format!("({})", n.as_str()))
            } else {
                (1, c[4].to_string())
            };

            step_counter += 1;
            let step = ChecklistStep {
                id: format!("{}_s{:03}", entry.id, step_counter),
                is_conditional: is_conditional(&instruction),
                instruction,
                action,
                indent_level,
                step_number: Some(step_number),
                sub_steps: vec![],
            };
            if !attach_step(&mut entry.steps, step) {
                tracing::warn!(
                    checklist = %entry.title,
                    indent_level,
                    "no parent one level up for step, kept at top level"
                );
                stats.orphan_steps += 1;
            }
            stats.steps += 1;
        }
        self.finish(current.take(), &mut entries, &mut stats);

        tracing::info!(
            lines = stats.lines_processed,
            checklists = stats.checklists,
            steps = stats.steps,
            dropped = stats.dropped_checklists,
            "checklist extraction complete"
        );
        Extraction { entries, stats }
    }

    fn finish(
        &self,
        entry: Option<ChecklistEntry>,
        entries: &mut Vec<ChecklistEntry>,
        stats: &mut ExtractStats,
    ) {
        let Some(entry) = entry else {
            return;
        };
        if entry.steps.is_empty() {
            tracing::debug!(checklist = %entry.title, "dropping checklist without steps");
            stats.dropped_checklists += 1;
        } else {
            stats.checklists += 1;
            entries.push(entry);
        }
    }

    /// Strips dot leaders and trailing periods: `"..... IDLE."` -> `"IDLE"`.
    fn clean_action(&self, action: &str) -> String {
        self.dotted
            .replace_all(action, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches('.')
            .trim()
            .to_string()
    }
}

fn is_conditional(instruction: &str) -> bool {
    let first = instruction
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    matches!(first.as_str(), "if" | "when" | "verify")
}

/// Returns `false` when the step had to be placed at top level for lack of a
/// parent.
fn attach_step(steps: &mut Vec<ChecklistStep>, step: ChecklistStep) -> bool {
    if step.indent_level == 0 {
        steps.push(step);
        return true;
    }
    let mut step = step;
    for candidate in steps.iter_mut().rev() {
        match attach_under(candidate, step) {
            Ok(()) => return true,
            Err(back) => step = back,
        }
    }
    steps.push(step);
    false
}

/// Most recent step exactly one level up wins; hands the step back when the
/// subtree has none.
fn attach_under(candidate: &mut ChecklistStep, step: ChecklistStep) -> Result<(), ChecklistStep> {
    if candidate.indent_level == step.indent_level - 1 {
        candidate.sub_steps.push(step);
        return Ok(());
    }
    let mut step = step;
    for child in candidate.sub_steps.iter_mut().rev() {
        match attach_under(child, step) {
            Ok(()) => return Ok(()),
            Err(back) => step = back,
        }
    }
    Err(step)
}
