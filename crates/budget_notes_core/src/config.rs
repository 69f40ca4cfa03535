//! Runtime configuration for core callers (CLI, hosts).
//!
//! # Invariants
//! - `log_level` is always a canonical level name after loading.
//! - `db_path = None` selects the in-memory store.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "BUDGET_NOTES_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BUDGET_NOTES_LOG_DIR";
pub const ENV_DB_PATH: &str = "BUDGET_NOTES_DB_PATH";

/// Core settings resolved from defaults plus overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file backing the document store.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    /// Loads overrides from the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads overrides through `lookup`; blank values are ignored.
    ///
    /// # Errors
    /// - Returns an error when the log level override is unsupported.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LoggingError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level)?.to_string();
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path.trim()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn overrides_are_normalized() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_LOG_DIR, "/var/log/budget-notes"),
            (ENV_DB_PATH, "  "),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/budget-notes")));
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn unsupported_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: CoreConfig =
            serde_json::from_value(serde_json::json!({ "db_path": "/tmp/notes.sqlite3" }))
                .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/notes.sqlite3")));
        assert_eq!(config.log_dir, None);
    }
}
