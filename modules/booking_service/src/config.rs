//! Configuration for the booking service module

use crate::domain::service::DEFAULT_RECENT_LIMIT;
use serde::{Deserialize, Serialize};

/// Booking service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How many venues and artists the landing page lists
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u64,

    /// Apply pending migrations during init
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            run_migrations: true,
        }
    }
}

fn default_recent_limit() -> u64 {
    DEFAULT_RECENT_LIMIT
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.recent_limit, 6);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"recent": 3}"#).is_err());
    }
}
