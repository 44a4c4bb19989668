//! AWS SNS SMS Transport Implementation
//!
//! Publishes rendered messages directly to a phone number. Delivery options
//! chosen by the policy travel as SNS message attributes.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::{error::DisplayErrorContext, types::MessageAttributeValue, Client as SnsClient};
use std::collections::HashMap;
use tracing::{debug, error};

use cms_core::domain::value_objects::SmsMessagePayload;
use cms_core::errors::AppResult;
use cms_core::services::MessageTransport;
use cms_shared::phone::mask_phone_number;

use crate::InfrastructureError;

/// Message type attribute (`Transactional` / `Promotional`)
pub const SMS_TYPE_ATTRIBUTE: &str = "AWS.SNS.SMS.SMSType";
/// Origination short code attribute
pub const ORIGINATION_NUMBER_ATTRIBUTE: &str = "AWS.MM.SMS.OriginationNumber";
/// Alphanumeric sender id attribute
pub const SENDER_ID_ATTRIBUTE: &str = "AWS.SNS.SMS.SenderID";

/// AWS SNS SMS transport
pub struct AwsSnsSmsTransport {
    client: SnsClient,
}

impl AwsSnsSmsTransport {
    /// Create a transport over an existing client
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }

    /// Create a transport from the shared SDK configuration
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self::new(SnsClient::new(config))
    }

    /// Build the SNS message attributes for a payload
    pub fn message_attributes(
        payload: &SmsMessagePayload,
    ) -> Result<HashMap<String, MessageAttributeValue>, InfrastructureError> {
        let mut attributes = HashMap::new();

        attributes.insert(
            SMS_TYPE_ATTRIBUTE.to_string(),
            string_attribute(payload.message_type.as_str())?,
        );

        if let Some(short_code) = payload.short_code.as_deref() {
            attributes.insert(
                ORIGINATION_NUMBER_ATTRIBUTE.to_string(),
                string_attribute(short_code)?,
            );
        }

        if let Some(sender_id) = payload.sender_id.as_deref() {
            attributes.insert(SENDER_ID_ATTRIBUTE.to_string(), string_attribute(sender_id)?);
        }

        Ok(attributes)
    }

    async fn publish(&self, payload: &SmsMessagePayload) -> Result<String, InfrastructureError> {
        let attributes = Self::message_attributes(payload)?;

        let response = self
            .client
            .publish()
            .phone_number(&payload.destination)
            .message(&payload.message)
            .set_message_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| {
                error!(
                    phone = %mask_phone_number(&payload.destination),
                    error = %DisplayErrorContext(&e),
                    event = "sms_publish_failed",
                    "Failed to send SMS via AWS SNS"
                );
                InfrastructureError::Sms(format!(
                    "Failed to send SMS via AWS SNS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(response.message_id().unwrap_or("unknown").to_string())
    }
}

fn string_attribute(value: &str) -> Result<MessageAttributeValue, InfrastructureError> {
    MessageAttributeValue::builder()
        .data_type("String")
        .string_value(value)
        .build()
        .map_err(|e| InfrastructureError::Sms(format!("Invalid message attribute: {}", e)))
}

#[async_trait]
impl MessageTransport<SmsMessagePayload> for AwsSnsSmsTransport {
    async fn send(&self, payload: &SmsMessagePayload) -> AppResult<()> {
        let message_id = self.publish(payload).await?;

        debug!(
            message_id = %message_id,
            phone = %mask_phone_number(&payload.destination),
            message_type = payload.message_type.as_str(),
            sender_id = ?payload.sender_id,
            short_code = ?payload.short_code,
            event = "sms_sent",
            "SMS sent via AWS SNS"
        );
        Ok(())
    }
}
