//! Outbound SMS payload.

use serde::{Deserialize, Serialize};

/// SMS delivery class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmsMessageType {
    #[default]
    Transactional,
    Promotional,
}

impl SmsMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transactional => "Transactional",
            Self::Promotional => "Promotional",
        }
    }
}

/// Final, rendered SMS handed to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessagePayload {
    /// E.164 destination
    pub destination: String,
    pub message: String,
    pub message_type: SmsMessageType,
    pub sender_id: Option<String>,
    pub short_code: Option<String>,
}
