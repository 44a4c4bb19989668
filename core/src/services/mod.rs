//! Business services containing the sending pipeline.

pub mod policy;
pub mod sms_sender;

// Re-export commonly used types
pub use policy::{ArtifactPolicy, LoadedPolicy, PolicyEngine, PolicyLoader};
pub use sms_sender::{
    CodeDecrypter, MessageSender, MessageTransport, SmsSender, SmsSenderConfig, CODE_PLACEHOLDER,
};
