//! Identity-provider trigger reasons

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-name prefix of SMS-class trigger events
pub const SMS_TRIGGER_PREFIX: &str = "CustomSMSSender";
/// Source-name prefix of email-class trigger events
pub const EMAIL_TRIGGER_PREFIX: &str = "CustomEmailSender";

/// Reason an SMS custom sender was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmsSenderTrigger {
    #[serde(rename = "CustomSMSSender_AccountTakeOverNotification")]
    AccountTakeOverNotification,
    #[serde(rename = "CustomSMSSender_AdminCreateUser")]
    AdminCreateUser,
    #[serde(rename = "CustomSMSSender_Authentication")]
    Authentication,
    #[serde(rename = "CustomSMSSender_ForgotPassword")]
    ForgotPassword,
    #[serde(rename = "CustomSMSSender_ResendCode")]
    ResendCode,
    #[serde(rename = "CustomSMSSender_SignUp")]
    SignUp,
    #[serde(rename = "CustomSMSSender_UpdateUserAttribute")]
    UpdateUserAttribute,
    #[serde(rename = "CustomSMSSender_VerifyUserAttribute")]
    VerifyUserAttribute,
}

impl SmsSenderTrigger {
    pub const ALL: [SmsSenderTrigger; 8] = [
        Self::AccountTakeOverNotification,
        Self::AdminCreateUser,
        Self::Authentication,
        Self::ForgotPassword,
        Self::ResendCode,
        Self::SignUp,
        Self::UpdateUserAttribute,
        Self::VerifyUserAttribute,
    ];

    /// Wire name as sent by the identity provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountTakeOverNotification => "CustomSMSSender_AccountTakeOverNotification",
            Self::AdminCreateUser => "CustomSMSSender_AdminCreateUser",
            Self::Authentication => "CustomSMSSender_Authentication",
            Self::ForgotPassword => "CustomSMSSender_ForgotPassword",
            Self::ResendCode => "CustomSMSSender_ResendCode",
            Self::SignUp => "CustomSMSSender_SignUp",
            Self::UpdateUserAttribute => "CustomSMSSender_UpdateUserAttribute",
            Self::VerifyUserAttribute => "CustomSMSSender_VerifyUserAttribute",
        }
    }

    /// Parse from a trigger source name
    pub fn from_source(source: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|trigger| trigger.as_str() == source)
    }
}

impl fmt::Display for SmsSenderTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery channel of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    Sms,
    Email,
}

impl MessageChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }

    /// Classify a trigger source by its prefix
    pub fn from_source(source: &str) -> Option<Self> {
        if source.starts_with(SMS_TRIGGER_PREFIX) {
            Some(Self::Sms)
        } else if source.starts_with(EMAIL_TRIGGER_PREFIX) {
            Some(Self::Email)
        } else {
            None
        }
    }
}
