//! Error types used across the domain layer.
//!
//! The taxonomy itself lives in `cms_shared` so adapters and the handler
//! share one error type; it is re-exported here for domain code.

pub use cms_shared::errors::{AppError, AppErrorKind, AppResult, ErrorClass};
