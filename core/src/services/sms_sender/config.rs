//! Configuration for the SMS sender

use cms_shared::config::{SenderConfig, DEFAULT_THROTTLE_PERIOD_IN_MINUTES};

/// Configuration for the SMS sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSenderConfig {
    /// Administrative switch; a disabled sender rejects every trigger
    pub enabled: bool,
    /// Trailing window used for the recent-attempts signal
    pub throttle_period_in_minutes: u64,
}

impl Default for SmsSenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            throttle_period_in_minutes: DEFAULT_THROTTLE_PERIOD_IN_MINUTES,
        }
    }
}

impl From<&SenderConfig> for SmsSenderConfig {
    fn from(config: &SenderConfig) -> Self {
        Self {
            enabled: config.sms_sender_enabled,
            throttle_period_in_minutes: config.throttle_period_in_minutes,
        }
    }
}
