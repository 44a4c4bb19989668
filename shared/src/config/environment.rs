//! Environment configuration module

use std::collections::HashMap;

/// Key/value view of the process environment
pub type EnvMap = HashMap<String, String>;

/// Environment variable names read by the sender
pub mod env_keys {
    pub const KMS_KEY_ID: &str = "KMS_KEY_ID";
    pub const DDB_TABLE_HISTORY_NAME: &str = "DDB_TABLE_HISTORY_NAME";
    pub const DDB_TABLE_HISTORY_TTL: &str = "DDB_TABLE_HISTORY_TTL";
    pub const SMS_SENDER_ENABLED: &str = "SMS_SENDER_ENABLED";
    pub const SMS_SENDER_POLICY_PATH: &str = "SMS_SENDER_POLICY_PATH";
    pub const SMS_SENDER_POLICY_ENTRYPOINT: &str = "SMS_SENDER_POLICY_ENTRYPOINT";
    pub const SMS_THROTTLE_PERIOD_IN_MINUTES: &str = "SMS_THROTTLE_PERIOD_IN_MINUTES";
    pub const EMAIL_SENDER_ENABLED: &str = "EMAIL_SENDER_ENABLED";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Snapshot the process environment
pub fn process_env() -> EnvMap {
    std::env::vars().collect()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or an EnvFilter expression)
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            json: true,
        }
    }
}

impl LoggingConfig {
    /// Build from an environment map. `LOG_LEVEL` wins over `RUST_LOG`.
    pub fn from_env_map(env: &EnvMap) -> Self {
        let level = [env_keys::LOG_LEVEL, env_keys::RUST_LOG]
            .iter()
            .filter_map(|key| env.get(*key))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(|value| value.to_lowercase())
            .unwrap_or_else(|| String::from("info"));

        Self {
            level,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults_to_info() {
        let config = LoggingConfig::from_env_map(&EnvMap::new());
        assert_eq!(config.level, "info");
        assert!(config.json);
    }

    #[test]
    fn test_log_level_preferred_over_rust_log() {
        let env: EnvMap = [
            (env_keys::LOG_LEVEL.to_string(), "DEBUG".to_string()),
            (env_keys::RUST_LOG.to_string(), "warn".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(LoggingConfig::from_env_map(&env).level, "debug");
    }

    #[test]
    fn test_blank_log_level_falls_through() {
        let env: EnvMap = [
            (env_keys::LOG_LEVEL.to_string(), "  ".to_string()),
            (env_keys::RUST_LOG.to_string(), "warn".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(LoggingConfig::from_env_map(&env).level, "warn");
    }
}
