//! Environment-driven configuration.
//!
//! All settings are read once at startup. Unset or unparsable values fall
//! back to defaults rather than aborting, except where noted.

use std::path::PathBuf;

use crate::domain::DEFAULT_RECENT_LIMIT;

pub const MODEL_PATH_ENV: &str = "DIABETES_PREDICTOR_MODEL_PATH";
pub const HISTORY_LIMIT_ENV: &str = "DIABETES_PREDICTOR_HISTORY_LIMIT";
pub const REQUIRE_CHECKSUM_ENV: &str = "DIABETES_PREDICTOR_REQUIRE_CHECKSUM";
pub const LOG_MODE_ENV: &str = "DIABETES_PREDICTOR_LOG_MODE";
pub const LOG_FILE_ENV: &str = "DIABETES_PREDICTOR_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/diabetes_model.json";
const DEFAULT_LOG_FILE: &str = "diabetes-predictor.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file given whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Model artifact loaded at startup
    pub model_path: PathBuf,

    /// Refuse to start when the artifact has no checksum sidecar
    pub require_checksum: bool,

    /// Number of records shown in the history panel
    pub history_limit: usize,

    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            require_checksum: false,
            history_limit: DEFAULT_RECENT_LIMIT,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            model_path: lookup(MODEL_PATH_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            require_checksum: lookup(REQUIRE_CHECKSUM_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_checksum),
            history_limit: lookup(HISTORY_LIMIT_ENV)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.history_limit),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup(LOG_FILE_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.history_limit, 10);
        assert_eq!(cfg.model_path, PathBuf::from("models/diabetes_model.json"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (MODEL_PATH_ENV, "/srv/model.json"),
            (HISTORY_LIMIT_ENV, "25"),
            (REQUIRE_CHECKSUM_ENV, "YES"),
            (LOG_MODE_ENV, "stdout"),
        ]);
        assert_eq!(cfg.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(cfg.history_limit, 25);
        assert!(cfg.require_checksum);
        assert_eq!(cfg.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[(HISTORY_LIMIT_ENV, "0"), (MODEL_PATH_ENV, "  ")]);
        assert_eq!(cfg.history_limit, DEFAULT_RECENT_LIMIT);
        assert_eq!(cfg.model_path, AppConfig::default().model_path);

        let cfg = config(&[(HISTORY_LIMIT_ENV, "ten")]);
        assert_eq!(cfg.history_limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn test_log_mode() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert_eq!(LogMode::parse("whatever"), LogMode::Auto);
    }
}
