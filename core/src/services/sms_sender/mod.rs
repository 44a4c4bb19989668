//! SMS sender module
//!
//! This module provides the policy-gated SMS pipeline including:
//! - Phone number validation
//! - Best-effort delivery history and the recent-attempts signal
//! - Policy evaluation with allow/block verdicts
//! - Code decryption and template substitution
//! - Dispatch through an SMS transport

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::SmsSenderConfig;
pub use service::{SmsSender, CODE_PLACEHOLDER};
pub use traits::{CodeDecrypter, MessageSender, MessageTransport};
