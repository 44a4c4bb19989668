//! Custom sender trigger event

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use cms_core::domain::entities::{MessageChannel, UserAttributes};

/// Caller details supplied by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    #[serde(default)]
    pub aws_sdk_version: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Request part of the event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSenderRequest {
    #[serde(default, rename = "type")]
    pub request_type: Option<String>,
    /// Encrypted one-time code
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub user_attributes: UserAttributes,
    #[serde(default)]
    pub client_metadata: Option<HashMap<String, String>>,
}

/// Custom SMS or email sender trigger event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSenderEvent {
    #[serde(default)]
    pub version: Option<String>,
    pub trigger_source: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub user_pool_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub caller_context: CallerContext,
    #[serde(default)]
    pub request: CustomSenderRequest,
}

impl CustomSenderEvent {
    /// Channel implied by the trigger source prefix
    pub fn channel(&self) -> Option<MessageChannel> {
        MessageChannel::from_source(&self.trigger_source)
    }

    pub fn encrypted_code(&self) -> Option<&str> {
        self.request.code.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_sms_event() {
        let event: CustomSenderEvent = serde_json::from_value(json!({
            "version": "1",
            "triggerSource": "CustomSMSSender_SignUp",
            "region": "us-east-1",
            "userPoolId": "us-east-1_abc",
            "userName": "user-1",
            "callerContext": { "awsSdkVersion": "aws-sdk-js-3", "clientId": "client-1" },
            "request": {
                "type": "customSMSSenderRequestV1",
                "code": "ABC123",
                "userAttributes": { "sub": "abc123", "phone_number": "+18135555555" }
            }
        }))
        .unwrap();

        assert_eq!(event.channel(), Some(MessageChannel::Sms));
        assert_eq!(event.caller_context.client_id.as_deref(), Some("client-1"));
        assert_eq!(event.encrypted_code(), Some("ABC123"));
        assert_eq!(event.request.user_attributes.sub(), Some("abc123"));
    }

    #[test]
    fn test_decode_minimal_event() {
        let event: CustomSenderEvent =
            serde_json::from_value(json!({ "triggerSource": "CustomEmailSender_SignUp" })).unwrap();

        assert_eq!(event.channel(), Some(MessageChannel::Email));
        assert_eq!(event.encrypted_code(), None);
        assert!(event.request.user_attributes.is_empty());
    }
}
