//! Configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CAPACITY_SERVICE_URL` | required |
//! | `CAPACITY_SERVICE_TIMEOUT_MS` | `5000` |
//! | `BOOKING_COUNTER_DB` | unset: in-memory counter |
//! | `BOOKING_REFERENCE_SEQUENCE` | `ContainerBookingReference` |
//! | `BOOKING_MAILBOX_SIZE` | `32` |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const CAPACITY_SERVICE_URL: &str = "CAPACITY_SERVICE_URL";
pub const CAPACITY_SERVICE_TIMEOUT_MS: &str = "CAPACITY_SERVICE_TIMEOUT_MS";
pub const BOOKING_COUNTER_DB: &str = "BOOKING_COUNTER_DB";
pub const BOOKING_REFERENCE_SEQUENCE: &str = "BOOKING_REFERENCE_SEQUENCE";
pub const BOOKING_MAILBOX_SIZE: &str = "BOOKING_MAILBOX_SIZE";

/// Sequence used for container booking references unless overridden.
pub const DEFAULT_SEQUENCE: &str = "ContainerBookingReference";

/// Errors raised while reading configuration. All of them are fatal at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Endpoint of the external capacity service (http or https).
    pub capacity_url: Url,
    pub capacity_timeout: Duration,
    /// Sled database backing the counter store; `None` keeps counters in memory.
    pub counter_db: Option<PathBuf>,
    pub sequence: String,
    /// Channel capacity of every actor.
    pub mailbox_size: usize,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_url = get(CAPACITY_SERVICE_URL).ok_or(ConfigError::Missing(CAPACITY_SERVICE_URL))?;
        let capacity_url = parse_endpoint(raw_url.trim())?;

        let timeout_ms: u64 = parse_or(get(CAPACITY_SERVICE_TIMEOUT_MS), CAPACITY_SERVICE_TIMEOUT_MS, 5000)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: CAPACITY_SERVICE_TIMEOUT_MS,
                reason: "must be greater than zero".into(),
            });
        }

        let mailbox_size: usize = parse_or(get(BOOKING_MAILBOX_SIZE), BOOKING_MAILBOX_SIZE, 32)?;
        if mailbox_size == 0 {
            return Err(ConfigError::Invalid {
                key: BOOKING_MAILBOX_SIZE,
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            capacity_url,
            capacity_timeout: Duration::from_millis(timeout_ms),
            counter_db: get(BOOKING_COUNTER_DB).map(PathBuf::from),
            sequence: get(BOOKING_REFERENCE_SEQUENCE)
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_SEQUENCE.to_string()),
            mailbox_size,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key: CAPACITY_SERVICE_URL,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key: CAPACITY_SERVICE_URL,
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_url_is_set() {
        let config = AppConfig::from_lookup(lookup(&[(
            CAPACITY_SERVICE_URL,
            "http://localhost:8080/capacity",
        )]))
        .unwrap();

        assert_eq!(config.capacity_url.as_str(), "http://localhost:8080/capacity");
        assert_eq!(config.capacity_timeout, Duration::from_millis(5000));
        assert_eq!(config.counter_db, None);
        assert_eq!(config.sequence, DEFAULT_SEQUENCE);
        assert_eq!(config.mailbox_size, 32);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            (CAPACITY_SERVICE_URL, "https://yard.example.com/check"),
            (CAPACITY_SERVICE_TIMEOUT_MS, "250"),
            (BOOKING_COUNTER_DB, "/var/lib/bookings"),
            (BOOKING_REFERENCE_SEQUENCE, "ReeferReference"),
            (BOOKING_MAILBOX_SIZE, "8"),
        ]))
        .unwrap();

        assert_eq!(config.capacity_timeout, Duration::from_millis(250));
        assert_eq!(config.counter_db, Some(PathBuf::from("/var/lib/bookings")));
        assert_eq!(config.sequence, "ReeferReference");
        assert_eq!(config.mailbox_size, 8);
    }

    #[test]
    fn test_missing_url_is_a_config_error() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(CAPACITY_SERVICE_URL))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(CAPACITY_SERVICE_URL, "  ")])),
            Err(ConfigError::Missing(CAPACITY_SERVICE_URL))
        );
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        for bad in ["not a url", "ftp://yard.example.com/check"] {
            let err = AppConfig::from_lookup(lookup(&[(CAPACITY_SERVICE_URL, bad)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: CAPACITY_SERVICE_URL, .. }),
                "{bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_bad_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            (CAPACITY_SERVICE_URL, "http://localhost/check"),
            (CAPACITY_SERVICE_TIMEOUT_MS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: CAPACITY_SERVICE_TIMEOUT_MS, .. }));

        let err = AppConfig::from_lookup(lookup(&[
            (CAPACITY_SERVICE_URL, "http://localhost/check"),
            (BOOKING_MAILBOX_SIZE, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BOOKING_MAILBOX_SIZE, .. }));
    }
}
