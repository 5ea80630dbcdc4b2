use crate::checklists::model::ChecklistEntry;

fn entry_matches(needle_lower: &str, entry: &ChecklistEntry) -> bool {
    [entry.cas.as_deref(), entry.alert_message.as_deref()]
        .into_iter()
        .flatten()
        .any(|candidate| candidate.to_lowercase() == needle_lower)
}

/// Every entry whose `cas` or `alert_message` equals `message`, ignoring
/// case, in document order. An absent message matches nothing.
pub fn matching_entries<'a>(
    message: Option<&str>,
    entries: &'a [ChecklistEntry],
) -> Vec<&'a ChecklistEntry> {
    let Some(message) = message else {
        return Vec::new();
    };
    let needle = message.to_lowercase();
    entries
        .iter()
        .filter(|e| entry_matches(&needle, e))
        .collect()
}

/// First entry in document order whose `cas` or `alert_message` equals
/// `message`, ignoring case.
///
/// Exact text only: no trimming, no punctuation folding, no best-match
/// ranking among several hits.
pub fn resolve_checklist<'a>(
    message: Option<&str>,
    entries: &'a [ChecklistEntry],
) -> Option<&'a ChecklistEntry> {
    let message = message?;
    let needle = message.to_lowercase();
    let found = entries.iter().find(|e| entry_matches(&needle, e));
    if found.is_none() {
        tracing::debug!(alert_message = message, "no checklist entry matches alert message");
    }
    found
}
