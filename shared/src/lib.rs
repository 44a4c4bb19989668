//! Shared utilities and common types for the custom message sender
//!
//! This crate provides functionality used across all workspace members:
//! - Error taxonomy (`AppError`, `AppErrorKind`, `ErrorClass`)
//! - Runtime configuration validation
//! - Utility functions (phone masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfigState, EnvMap, HistoryTableConfig, LoggingConfig, RuntimeConfig, SenderConfig,
};
pub use errors::{AppError, AppErrorKind, AppResult, ErrorClass};
pub use utils::phone;
