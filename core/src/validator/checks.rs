use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCatalog {
    pub checks_version: String,
    pub checks: Vec<CheckDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub check_id: String,
    pub severity: String,
    pub description: String,
}

impl CheckCatalog {
    pub fn severity_of(&self, check_id: &str) -> Option<&str> {
        self.checks
            .iter()
            .find(|c| c.check_id == check_id)
            .map(|c| c.severity.as_str())
    }
}

pub fn dataset_checks_v1() -> CheckCatalog {
    let json = include_str!("dataset_checks_v1.json");
    serde_json::from_str(json).expect("embedded dataset checks v1 JSON must parse")
}
