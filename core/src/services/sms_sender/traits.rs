//! Collaborator traits for the SMS sender

use async_trait::async_trait;

use crate::domain::entities::{SmsSenderTrigger, UserAttributes};
use crate::errors::AppResult;

/// Turns a provider-supplied ciphertext into the plaintext one-time code
#[async_trait]
pub trait CodeDecrypter: Send + Sync {
    /// Fails with `DECRYPTION_FAILED`
    async fn decrypt(&self, ciphertext: &str) -> AppResult<String>;
}

/// Dispatches a rendered message of type `P`
#[async_trait]
pub trait MessageTransport<P: Send + Sync>: Send + Sync {
    async fn send(&self, payload: &P) -> AppResult<()>;
}

/// Entry point used by the trigger boundary
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Run the full pipeline for one trigger invocation
    async fn send(
        &self,
        trigger: SmsSenderTrigger,
        user_attributes: &UserAttributes,
        encrypted_code: Option<&str>,
    ) -> AppResult<()>;
}
