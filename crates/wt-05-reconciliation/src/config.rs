//! Configuration for the Reconciliation Subsystem.

use serde::{Deserialize, Serialize};

/// Reconciliation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Seconds between scheduled runs.
    pub interval_secs: u64,
    /// Subject line for mismatch alerts.
    pub alert_subject: String,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3_600,
            alert_subject: "Warehouse roll-count mismatch".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReconciliationConfig::default();
        assert_eq!(config.interval_secs, 3_600);
        assert!(!config.alert_subject.is_empty());
    }
}
