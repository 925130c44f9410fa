//! Runtime settings
//!
//! Settings are read from environment variables. Command-line flags take
//! precedence over anything configured here.
//!
//! | variable          | meaning                              |
//! |-------------------|--------------------------------------|
//! | `NETCALC_OUTPUT`  | default output format (e.g. `json`)  |
//! | `NETCALC_WORKERS` | thread count for batch mode          |
//! | `NETCALC_LOG`     | log level (`error` .. `trace`)       |

use std::env;
use thiserror::Error;

pub const OUTPUT_VAR: &str = "NETCALC_OUTPUT";
pub const WORKERS_VAR: &str = "NETCALC_WORKERS";
pub const LOG_VAR: &str = "NETCALC_LOG";

/// Settings errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable is set but its value cannot be used
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Settings resolved from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Default output format name, lowercased
    pub output: Option<String>,
    /// Batch worker threads
    pub workers: Option<usize>,
    /// Log level name, lowercased
    pub log_level: Option<String>,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read settings through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let workers = match get(WORKERS_VAR) {
            Some(value) => match value.parse::<usize>() {
                Ok(0) => {
                    return Err(SettingsError::InvalidValue {
                        var: WORKERS_VAR,
                        value,
                        reason: "must be at least 1",
                    })
                }
                Ok(n) => Some(n),
                Err(_) => {
                    return Err(SettingsError::InvalidValue {
                        var: WORKERS_VAR,
                        value,
                        reason: "not a number",
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            output: get(OUTPUT_VAR).map(|v| v.to_lowercase()),
            workers,
            log_level: get(LOG_VAR).map(|v| v.to_lowercase()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_all_values() {
        let settings = Settings::from_lookup(lookup(&[
            (OUTPUT_VAR, "JSON"),
            (WORKERS_VAR, "8"),
            (LOG_VAR, "Debug"),
        ]))
        .unwrap();

        assert_eq!(settings.output.as_deref(), Some("json"));
        assert_eq!(settings.workers, Some(8));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let settings =
            Settings::from_lookup(lookup(&[(OUTPUT_VAR, "  "), (WORKERS_VAR, "")])).unwrap();
        assert_eq!(settings.output, None);
        assert_eq!(settings.workers, None);
    }

    #[test]
    fn test_invalid_workers() {
        let err = Settings::from_lookup(lookup(&[(WORKERS_VAR, "many")])).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { var: WORKERS_VAR, .. }));

        let err = Settings::from_lookup(lookup(&[(WORKERS_VAR, "0")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for NETCALC_WORKERS: \"0\" (must be at least 1)"
        );
    }
}
