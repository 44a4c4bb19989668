//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the custom message
//! sender. It provides concrete implementations of the collaborator traits
//! declared in `cms_core` over managed services.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: AWS SNS transport
//! - **Database**: DynamoDB history store
//! - **Crypto**: Encryption SDK code decrypter with a KMS keyring
//! - **Policy**: OPA WebAssembly policy loader (opa-wasm)
//!
//! ## Features
//!
//! - `aws-sns`: Enable the AWS SNS SMS transport (default)
//! - `aws-dynamodb`: Enable the DynamoDB history store (default)
//! - `aws-kms`: Enable the KMS decrypter (default)
//! - `opa-wasm`: Enable the OPA WebAssembly policy loader (default)

use cms_core::errors::{AppError, AppErrorKind};

/// SMS transport module
#[cfg(feature = "aws-sns")]
pub mod sms;

/// Database module - history store implementations
#[cfg(feature = "aws-dynamodb")]
pub mod database;

/// Crypto module - code decrypters
#[cfg(feature = "aws-kms")]
pub mod crypto;

/// Policy module - compiled policy loaders
#[cfg(feature = "opa-wasm")]
pub mod policy;

#[cfg(all(
    feature = "aws-sns",
    feature = "aws-dynamodb",
    feature = "aws-kms",
    feature = "opa-wasm"
))]
mod services;

#[cfg(all(
    feature = "aws-sns",
    feature = "aws-dynamodb",
    feature = "aws-kms",
    feature = "opa-wasm"
))]
pub use services::{initialize, InfrastructureServices};

/// Load the shared AWS SDK configuration from the environment
#[cfg(any(feature = "aws-sns", feature = "aws-dynamodb", feature = "aws-kms"))]
pub async fn load_aws_config() -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// History table error
    #[error("Database error: {0}")]
    Database(String),

    /// Decryption error
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Policy runtime error
    #[error("Policy error: {0}")]
    Policy(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InfrastructureError {
    /// Error kind reported to the domain layer
    pub fn kind(&self) -> AppErrorKind {
        match self {
            Self::Sms(_) => AppErrorKind::SmsSendingFailed,
            Self::Database(_) => AppErrorKind::Unknown,
            Self::Crypto(_) => AppErrorKind::DecryptionFailed,
            Self::Policy(_) => AppErrorKind::PolicyEvaluationFailed,
            Self::Config(_) => AppErrorKind::AppConfigMissingRequiredProperty,
        }
    }
}

impl From<InfrastructureError> for AppError {
    fn from(err: InfrastructureError) -> Self {
        AppError::system(err.kind(), err.to_string()).with_source(err)
    }
}
