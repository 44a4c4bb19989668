//! Shared error taxonomy
//!
//! Every failure that crosses a crate boundary is an [`AppError`]. Each error
//! carries a stable [`AppErrorKind`] tag and belongs to exactly one
//! [`ErrorClass`], which decides how the trigger boundary reacts to it:
//! input-class errors are logged and swallowed, system-class errors are
//! logged and re-thrown.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable, machine-readable error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppErrorKind {
    AppConfigMissingRequiredProperty,
    DecryptionFailed,
    NotImplemented,
    ServiceNotEnabled,
    MessageBlocked,
    PolicyEvaluationFailed,
    SmsSendingFailed,
    UserAttributeIsAclFiltered,
    UserEmailIsInvalid,
    UserEmailIsAclFiltered,
    UserPhoneNumberIsInvalid,
    UserPhoneNumberIsAclFiltered,
    UserThrottled,
    Unknown,
}

impl AppErrorKind {
    /// String tag used in logs and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppConfigMissingRequiredProperty => "APP_CONFIG_MISSING_REQUIRED_PROPERTY",
            Self::DecryptionFailed => "DECRYPTION_FAILED",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::ServiceNotEnabled => "SERVICE_NOT_ENABLED",
            Self::MessageBlocked => "MESSAGE_BLOCKED",
            Self::PolicyEvaluationFailed => "POLICY_EVALUATION_FAILED",
            Self::SmsSendingFailed => "SMS_SENDING_FAILED",
            Self::UserAttributeIsAclFiltered => "USER_ATTRIBUTE_IS_ACL_FILTERED",
            Self::UserEmailIsInvalid => "USER_EMAIL_IS_INVALID",
            Self::UserEmailIsAclFiltered => "USER_EMAIL_IS_ACL_FILTERED",
            Self::UserPhoneNumberIsInvalid => "USER_PHONE_NUMBER_IS_INVALID",
            Self::UserPhoneNumberIsAclFiltered => "USER_PHONE_NUMBER_IS_ACL_FILTERED",
            Self::UserThrottled => "USER_THROTTLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    /// Attributable to the request or to a deliberate policy decision
    Input,
    /// Infrastructure or programming failure
    System,
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Application error
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller-input-class error
    #[error("{message}")]
    Input { kind: AppErrorKind, message: String },

    /// System-class error
    #[error("{message}")]
    System {
        kind: AppErrorKind,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AppError {
    /// Create a caller-input-class error
    pub fn input(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self::Input {
            kind,
            message: message.into(),
        }
    }

    /// Create a system-class error
    pub fn system(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self::System {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause. Input-class errors ignore it.
    pub fn with_source<E>(self, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::System { kind, message, .. } => Self::System {
                kind,
                message,
                source: Some(Box::new(err)),
            },
            input => input,
        }
    }

    pub fn kind(&self) -> AppErrorKind {
        match self {
            Self::Input { kind, .. } | Self::System { kind, .. } => *kind,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Input { .. } => ErrorClass::Input,
            Self::System { .. } => ErrorClass::System,
        }
    }

    pub fn is_input(&self) -> bool {
        self.class() == ErrorClass::Input
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Input { message, .. } | Self::System { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::system(AppErrorKind::Unknown, format!("serialization failed: {}", err))
            .with_source(err)
    }
}

/// Result alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;
