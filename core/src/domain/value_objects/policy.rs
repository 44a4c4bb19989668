//! Policy decision request and verdict.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{NormalizedPhoneNumber, SmsSenderTrigger, UserAttributes};
use crate::errors::{AppError, AppErrorKind, AppResult};

use super::sms_message::SmsMessageType;

/// Reason used when a block verdict carries none
pub const BLOCK_REASON_FALLBACK: &str = "reason not provided";

/// Throttling context handed to the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyHistory {
    /// Prior sends inside the throttle window
    pub recent_attempts: u64,
}

/// Input document for the policy engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecisionRequest {
    pub trigger: SmsSenderTrigger,
    pub user_attributes: UserAttributes,
    pub phone_number_data: NormalizedPhoneNumber,
    pub history: PolicyHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Allow,
    Block,
}

/// Payload of an `allow` verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedMessage {
    /// Template, may contain the `{####}` code placeholder
    pub message: String,
    #[serde(default)]
    pub message_type: Option<SmsMessageType>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
}

/// Payload of a `block` verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedMessage {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Verdict returned by the policy engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub action: PolicyAction,
    #[serde(default)]
    pub allow: Option<AllowedMessage>,
    #[serde(default)]
    pub block: Option<BlockedMessage>,
}

impl PolicyDecision {
    pub fn allow(message: AllowedMessage) -> Self {
        Self {
            action: PolicyAction::Allow,
            allow: Some(message),
            block: None,
        }
    }

    pub fn block(reason: Option<String>) -> Self {
        Self {
            action: PolicyAction::Block,
            allow: None,
            block: Some(BlockedMessage { reason }),
        }
    }

    /// Resolve the verdict into the message to send.
    ///
    /// A block becomes an input-class `MESSAGE_BLOCKED`; an allow without a
    /// payload is a malformed policy output and therefore system-class.
    pub fn into_allowed(self) -> AppResult<AllowedMessage> {
        match self.action {
            PolicyAction::Block => {
                let reason = self
                    .block
                    .and_then(|block| block.reason)
                    .filter(|reason| !reason.is_empty())
                    .unwrap_or_else(|| BLOCK_REASON_FALLBACK.to_string());
                Err(AppError::input(AppErrorKind::MessageBlocked, reason))
            }
            PolicyAction::Allow => self.allow.ok_or_else(|| {
                AppError::system(
                    AppErrorKind::PolicyEvaluationFailed,
                    "policy allowed the message without an allow payload",
                )
            }),
        }
    }
}
