//! Tests for the AWS SNS SMS transport

use cms_core::domain::value_objects::{SmsMessagePayload, SmsMessageType};

use crate::sms::aws_sns::{
    AwsSnsSmsTransport, ORIGINATION_NUMBER_ATTRIBUTE, SENDER_ID_ATTRIBUTE, SMS_TYPE_ATTRIBUTE,
};

fn payload() -> SmsMessagePayload {
    SmsMessagePayload {
        destination: "+18135555555".to_string(),
        message: "Your code is 4821".to_string(),
        message_type: SmsMessageType::Transactional,
        sender_id: None,
        short_code: None,
    }
}

#[test]
fn test_attributes_carry_message_type_only_by_default() {
    let attributes = AwsSnsSmsTransport::message_attributes(&payload()).unwrap();

    assert_eq!(attributes.len(), 1);
    assert_eq!(
        attributes[SMS_TYPE_ATTRIBUTE].string_value(),
        Some("Transactional")
    );
}

#[test]
fn test_attributes_include_short_code_and_sender_id() {
    let payload = SmsMessagePayload {
        message_type: SmsMessageType::Promotional,
        sender_id: Some("ACME".to_string()),
        short_code: Some("12345".to_string()),
        ..payload()
    };

    let attributes = AwsSnsSmsTransport::message_attributes(&payload).unwrap();

    assert_eq!(attributes.len(), 3);
    assert_eq!(
        attributes[SMS_TYPE_ATTRIBUTE].string_value(),
        Some("Promotional")
    );
    assert_eq!(
        attributes[ORIGINATION_NUMBER_ATTRIBUTE].string_value(),
        Some("12345")
    );
    assert_eq!(attributes[SENDER_ID_ATTRIBUTE].string_value(), Some("ACME"));
}

#[test]
fn test_attribute_names() {
    assert_eq!(SMS_TYPE_ATTRIBUTE, "AWS.SNS.SMS.SMSType");
    assert_eq!(ORIGINATION_NUMBER_ATTRIBUTE, "AWS.MM.SMS.OriginationNumber");
    assert_eq!(SENDER_ID_ATTRIBUTE, "AWS.SNS.SMS.SenderID");
}
