use crate::alerts::identity::unique_identifier;
use crate::alerts::model::{Alert, AlertAction, AlertCategory};
use crate::error::{CoreError, CoreResult};
use crate::library::DatasetFingerprint;
use std::collections::BTreeSet;

/// Parse the alert catalog document (a JSON array of alerts).
///
/// Any unknown enum value fails the whole document.
pub fn load_alerts(bytes: &[u8]) -> CoreResult<Vec<Alert>> {
    let alerts: Vec<Alert> = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::Parse(format!("Failed to parse alert catalog: {}", e)))?;
    tracing::debug!(count = alerts.len(), "loaded alert catalog");
    Ok(alerts)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCatalog {
    alerts: Vec<Alert>,
}

impl AlertCatalog {
    pub fn new(alerts: Vec<Alert>) -> Self {
        let duplicates = duplicate_identifiers(&alerts);
        if !duplicates.is_empty() {
            tracing::warn!(
                duplicates = %duplicates.join(", "),
                "alert catalog contains colliding unique identifiers; first entry wins"
            );
        }
        Self { alerts }
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        Ok(Self::new(load_alerts(bytes)?))
    }

    /// A catalog that failed to parse degrades to empty and carries no
    /// fingerprint.
    pub fn from_bytes_or_empty(bytes: &[u8]) -> (Self, Option<DatasetFingerprint>) {
        match Self::from_bytes(bytes) {
            Ok(catalog) => {
                let fp = DatasetFingerprint::of(bytes, catalog.len());
                (catalog, Some(fp))
            }
            Err(e) => {
                tracing::warn!(error = %e, "alert catalog unavailable, continuing with no alerts");
                (Self::default(), None)
            }
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&Alert> {
        self.alerts
            .iter()
            .find(|a| unique_identifier(a) == identifier)
    }

    pub fn simulatable(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts
            .iter()
            .filter(|a| a.action == AlertAction::Simulate)
    }

    pub fn by_category(&self, category: AlertCategory) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter().filter(move |a| a.category == category)
    }
}

/// Identifiers produced by more than one alert, sorted.
pub fn duplicate_identifiers(alerts: &[Alert]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dup = BTreeSet::new();
    for a in alerts {
        let id = unique_identifier(a);
        if !seen.insert(id.clone()) {
            dup.insert(id);
        }
    }
    dup.into_iter().collect()
}
