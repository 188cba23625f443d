//! User service configuration.

use std::env;

use common::{DatabaseConfig, DeadlineConfig};

/// User service configuration.
///
/// Built once at startup and handed to each component; nothing reads the
/// environment after construction.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Connection settings for the account database
    pub database: DatabaseConfig,
    /// Deadline applied to every storage call
    pub deadline: DeadlineConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            deadline: DeadlineConfig {
                timeout_seconds: timeout_seconds(env::var("CONTEXT_TIMEOUT").ok().as_deref())
                    .unwrap_or(defaults.deadline.timeout_seconds),
            },
        }
    }
}

/// Parse a numeric variable; a trailing seconds unit (`30s`) is accepted.
fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| parse_number(&v))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().trim_end_matches('s').parse().ok()
}

/// A zero deadline would fail every call, so it counts as unset.
fn timeout_seconds(raw: Option<&str>) -> Option<u64> {
    raw.and_then(parse_number::<u64>).filter(|secs| *secs > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_accepts_seconds_suffix() {
        assert_eq!(timeout_seconds(Some("45")), Some(45));
        assert_eq!(timeout_seconds(Some(" 10s ")), Some(10));
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        assert_eq!(timeout_seconds(Some("0")), None);
        assert_eq!(timeout_seconds(Some("0s")), None);

        let fallback =
            timeout_seconds(Some("0")).unwrap_or(DeadlineConfig::default().timeout_seconds);
        assert_eq!(fallback, 30);
    }

    #[test]
    fn test_unparsable_timeout_is_unset() {
        assert_eq!(timeout_seconds(Some("soon")), None);
        assert_eq!(timeout_seconds(Some("-5")), None);
        assert_eq!(timeout_seconds(None), None);
    }
}
