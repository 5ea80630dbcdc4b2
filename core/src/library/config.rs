use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryConfig {
    pub alerts_path: PathBuf,
    pub checklists_path: PathBuf,
}

impl LibraryConfig {
    /// Relative dataset paths are taken relative to the config file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let mut cfg: LibraryConfig = serde_json::from_slice(&bytes)?;
        if cfg.alerts_path.as_os_str().is_empty() || cfg.checklists_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "library config requires alerts_path and checklists_path".to_string(),
            ));
        }
        if let Some(base) = path.parent() {
            if cfg.alerts_path.is_relative() {
                cfg.alerts_path = base.join(&cfg.alerts_path);
            }
            if cfg.checklists_path.is_relative() {
                cfg.checklists_path = base.join(&cfg.checklists_path);
            }
        }
        Ok(cfg)
    }
}
