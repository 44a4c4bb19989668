//! Runtime configuration guard
//!
//! [`RuntimeConfig`] starts in [`AppConfigState::NotReady`] and moves to
//! [`AppConfigState::Ready`] exactly once, after the required properties have
//! been validated. The snapshot is never mutated afterwards.

use serde::Serialize;
use std::path::PathBuf;

use crate::errors::{AppError, AppErrorKind, AppResult};

use super::environment::{env_keys, EnvMap};

/// Default SMS throttle window in minutes
pub const DEFAULT_THROTTLE_PERIOD_IN_MINUTES: u64 = 15;
/// Default history retention in minutes (30 days)
pub const DEFAULT_HISTORY_TTL_IN_MINUTES: u64 = 43_200;
/// Default location of the compiled policy artifact
pub const DEFAULT_POLICY_PATH: &str = "./policy.wasm";

/// Configuration lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppConfigState {
    NotReady,
    Ready,
}

/// History table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryTableConfig {
    /// Table name
    pub name: String,
    /// Retention window in minutes
    pub ttl_length: u64,
}

/// Validated configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderConfig {
    /// Key id used to decrypt provider-supplied codes
    pub key_id: String,
    /// History store settings
    pub history_table: HistoryTableConfig,
    /// Trailing window for recent-attempt counts
    pub throttle_period_in_minutes: u64,
    /// Administrative switch for the SMS sender
    pub sms_sender_enabled: bool,
    /// Compiled policy artifact location
    pub sms_sender_policy_path: PathBuf,
    /// Policy entrypoint; the artifact's only entrypoint when unset
    pub sms_sender_policy_entrypoint: Option<String>,
    /// Administrative switch for the email sender
    pub email_sender_enabled: bool,
}

/// One-shot runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    state: AppConfigState,
    snapshot: Option<SenderConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    /// Create an unvalidated configuration
    pub fn new() -> Self {
        Self {
            state: AppConfigState::NotReady,
            snapshot: None,
        }
    }

    pub fn state(&self) -> AppConfigState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AppConfigState::Ready
    }

    /// Validated snapshot, present once READY
    pub fn snapshot(&self) -> Option<&SenderConfig> {
        self.snapshot.as_ref()
    }

    /// Validate `env` and transition to READY.
    ///
    /// Calling this again while READY leaves the existing snapshot untouched.
    /// On failure the state stays NOT_READY.
    pub fn update(&mut self, env: &EnvMap) -> AppResult<()> {
        if self.is_ready() {
            tracing::debug!("app config already ready, skipping update");
            return Ok(());
        }

        let key_id = required(env, env_keys::KMS_KEY_ID)?;
        let table_name = required(env, env_keys::DDB_TABLE_HISTORY_NAME)?;

        let config = SenderConfig {
            key_id,
            history_table: HistoryTableConfig {
                name: table_name,
                ttl_length: number_or(
                    env,
                    env_keys::DDB_TABLE_HISTORY_TTL,
                    DEFAULT_HISTORY_TTL_IN_MINUTES,
                ),
            },
            throttle_period_in_minutes: number_or(
                env,
                env_keys::SMS_THROTTLE_PERIOD_IN_MINUTES,
                DEFAULT_THROTTLE_PERIOD_IN_MINUTES,
            ),
            // Only an explicit "false" disables the SMS sender
            sms_sender_enabled: env
                .get(env_keys::SMS_SENDER_ENABLED)
                .map(|value| value.trim() != "false")
                .unwrap_or(true),
            sms_sender_policy_path: env
                .get(env_keys::SMS_SENDER_POLICY_PATH)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_POLICY_PATH)),
            sms_sender_policy_entrypoint: env
                .get(env_keys::SMS_SENDER_POLICY_ENTRYPOINT)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            // Only an explicit "true" enables the email sender
            email_sender_enabled: env
                .get(env_keys::EMAIL_SENDER_ENABLED)
                .map(|value| value.trim() == "true")
                .unwrap_or(false),
        };

        tracing::debug!(config = ?config, "app config updated");

        self.snapshot = Some(config);
        self.state = AppConfigState::Ready;
        Ok(())
    }
}

fn required(env: &EnvMap, key: &str) -> AppResult<String> {
    env.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::system(
                AppErrorKind::AppConfigMissingRequiredProperty,
                format!("required environment is missing or empty: {}", key),
            )
        })
}

fn number_or(env: &EnvMap, key: &str, default: u64) -> u64 {
    match env.get(key).map(|value| value.trim()).filter(|value| !value.is_empty()) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = key, value = raw, default = default, "invalid numeric environment value, using default");
            default
        }),
    }
}
