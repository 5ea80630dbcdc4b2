use crate::alerts::model::{Alert, AlertCategory, AlertType};

pub fn category_code(category: AlertCategory) -> &'static str {
    match category {
        AlertCategory::Abnormal => "AB",
        AlertCategory::Emergency => "EM",
        AlertCategory::Normal => "NM",
    }
}

pub fn alert_type_code(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::Cas => "CAS",
        AlertType::Situation => "SITU",
    }
}

pub fn category_display_name(category: AlertCategory) -> &'static str {
    match category {
        AlertCategory::Abnormal => "Abnormal",
        AlertCategory::Emergency => "Emergency",
        AlertCategory::Normal => "Normal",
    }
}

pub fn alert_type_display_name(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::Cas => "CAS",
        AlertType::Situation => "Situation",
    }
}

/// `uid-CATEGORY-TYPE[-message]`, e.g. `1-AB-CAS-OIL PX LOW`.
///
/// The uid is numeric and both codes come from closed sets, so distinct
/// (uid, category, type, message) tuples produce distinct identifiers.
pub fn unique_identifier(alert: &Alert) -> String {
    let mut parts = vec![
        alert.uid.to_string(),
        category_code(alert.category).to_string(),
        alert_type_code(alert.alert_type).to_string(),
    ];
    if let Some(message) = &alert.message {
        parts.push(message.clone());
    }
    parts.join("-")
}

pub fn alert_title(alert: &Alert) -> String {
    format!(
        "{} {}",
        category_display_name(alert.category),
        alert_type_display_name(alert.alert_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::model::{AlertAction, AlertPriority};
    use std::collections::BTreeSet;

    fn alert(
        uid: i64,
        category: AlertCategory,
        alert_type: AlertType,
        message: Option<&str>,
    ) -> Alert {
        Alert {
            category,
            action: AlertAction::Simulate,
            priority: AlertPriority::Medium,
            alert_type,
            message: message.map(str::to_string),
            submessage: None,
            description: None,
            uid,
        }
    }

    #[test]
    fn identifier_joins_uid_codes_and_message() {
        let a = alert(1, AlertCategory::Abnormal, AlertType::Cas, Some("OIL PX LOW"));
        assert_eq!(unique_identifier(&a), "1-AB-CAS-OIL PX LOW");
    }

    #[test]
    fn identifier_omits_absent_message() {
        let a = alert(7, AlertCategory::Emergency, AlertType::Situation, None);
        assert_eq!(unique_identifier(&a), "7-EM-SITU");
    }

    #[test]
    fn identifier_is_stable_across_calls() {
        let a = alert(3, AlertCategory::Normal, AlertType::Cas, Some("START ENGAGED"));
        assert_eq!(unique_identifier(&a), unique_identifier(&a.clone()));
    }

    #[test]
    fn distinct_tuples_give_distinct_identifiers() {
        let categories = [
            AlertCategory::Abnormal,
            AlertCategory::Emergency,
            AlertCategory::Normal,
        ];
        let types = [AlertType::Cas, AlertType::Situation];
        let messages = [None, Some(""), Some("OIL PX LOW"), Some("OIL-PX LOW"), Some("1")];

        let mut seen = BTreeSet::new();
        let mut count = 0;
        for uid in [1, 2, 11, -1] {
            for category in categories {
                for alert_type in types {
                    for message in messages {
                        count += 1;
                        seen.insert(unique_identifier(&alert(uid, category, alert_type, message)));
                    }
                }
            }
        }
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn title_combines_category_and_type() {
        let a = alert(1, AlertCategory::Emergency, AlertType::Situation, None);
        assert_eq!(alert_title(&a), "Emergency Situation");
        let b = alert(2, AlertCategory::Abnormal, AlertType::Cas, Some("FUEL LOW TOTAL"));
        assert_eq!(alert_title(&b), "Abnormal CAS");
    }
}
