use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Abnormal,
    Emergency,
    Normal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Simulate,
    Ignore,
    Review,
}

/// Carried for the presentation layer; resolution never looks at it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    #[default]
    Medium,
    Low,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Cas,
    Situation,
}

/// One annunciation from the alert catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub category: AlertCategory,
    pub action: AlertAction,
    #[serde(default, deserialize_with = "priority_or_default")]
    pub priority: AlertPriority,
    #[serde(rename = "alertType")]
    pub alert_type: AlertType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Tells apart two alerts that share the same `message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submessage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub uid: i64,
}

/// `null` reads as the default priority; unknown strings still fail.
fn priority_or_default<'de, D>(deserializer: D) -> Result<AlertPriority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AlertPriority>::deserialize(deserializer)?.unwrap_or_default())
}
