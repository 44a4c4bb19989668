//! # Custom Message Sender Core
//!
//! Domain layer for the custom message sender. This crate contains the
//! trigger and phone number entities, the policy request/verdict types, the
//! history repository with its query construction, the policy engine
//! abstraction and the SMS sender orchestrator.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{AppError, AppErrorKind, AppResult, ErrorClass};
