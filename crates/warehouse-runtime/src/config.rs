//! # Runtime Configuration
//!
//! Unified configuration for the service process. Loaded from the JSON file
//! named by `WT_CONFIG`, with sane defaults when unset.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wt_05_reconciliation::ReconciliationConfig;

/// Complete runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Public base URL used for QR short links.
    pub site_url: String,
    /// Snapshot file for the store; `None` runs fully in memory.
    pub data_file: Option<PathBuf>,
    /// Reconciliation scheduling and alerting.
    pub reconciliation: ReconciliationConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:8000".to_owned(),
            data_file: None,
            reconciliation: ReconciliationConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load from the file named by `WT_CONFIG`, or defaults if unset.
    pub fn load_from_env() -> anyhow::Result<Self> {
        match std::env::var_os("WT_CONFIG") {
            Some(path) => {
                let bytes = std::fs::read(&path).map_err(|e| {
                    anyhow::anyhow!("cannot read config {}: {e}", PathBuf::from(&path).display())
                })?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => Ok(Self::default()),
        }
    }
}
