//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Path of the book content file.
pub const CONTENT_VAR: &str = "PICTUREBOOK_CONTENT";

/// Tick interval of the event loop, in milliseconds.
pub const TICK_MS_VAR: &str = "PICTUREBOOK_TICK_MS";

/// Tick interval used when none is configured.
pub const DEFAULT_TICK_MS: u64 = 16;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    /// A variable is set to something unusable.
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        /// The variable.
        name: &'static str,
        /// What it was set to.
        value: String,
        /// What it should be.
        expected: &'static str,
    },
}

/// Settings of the headless runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Book content file (`.yaml`, `.yml` or `.json`).
    pub content_path: PathBuf,
    /// How often the event loop ticks the reader.
    pub tick: Duration,
}

impl RuntimeConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the content path is missing or the tick
    /// interval is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let content_path = lookup(CONTENT_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(CONTENT_VAR))?;

        let tick_ms = match lookup(TICK_MS_VAR) {
            None => DEFAULT_TICK_MS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TICK_MS_VAR,
                        value,
                        expected: "a positive number of milliseconds",
                    });
                }
            },
        };

        Ok(Self {
            content_path,
            tick: Duration::from_millis(tick_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_tick_interval() {
        // Act
        let config = RuntimeConfig::from_lookup(lookup(&[(CONTENT_VAR, "book.yaml")])).unwrap();

        // Assert
        assert_eq!(config.content_path, PathBuf::from("book.yaml"));
        assert_eq!(config.tick, Duration::from_millis(DEFAULT_TICK_MS));
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let result = RuntimeConfig::from_lookup(lookup(&[(TICK_MS_VAR, "10")]));

        assert_eq!(result, Err(ConfigError::Missing(CONTENT_VAR)));
    }

    #[test]
    fn test_zero_or_garbage_tick_is_rejected() {
        for value in ["0", "fast", "-5"] {
            let result = RuntimeConfig::from_lookup(lookup(&[
                (CONTENT_VAR, "book.yaml"),
                (TICK_MS_VAR, value),
            ]));

            match result {
                Err(ConfigError::Invalid { name, .. }) => assert_eq!(name, TICK_MS_VAR),
                other => panic!("expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_explicit_tick() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (CONTENT_VAR, "book.json"),
            (TICK_MS_VAR, "33"),
        ]))
        .unwrap();

        assert_eq!(config.tick, Duration::from_millis(33));
    }
}
