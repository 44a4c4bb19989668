//! Value objects representing immutable domain concepts.

pub mod policy;
pub mod sms_message;

// Re-export commonly used types
pub use policy::{
    AllowedMessage, BlockedMessage, PolicyAction, PolicyDecision, PolicyDecisionRequest,
    PolicyHistory, BLOCK_REASON_FALLBACK,
};
pub use sms_message::{SmsMessagePayload, SmsMessageType};
