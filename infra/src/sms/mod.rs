//! SMS Transport Module
//!
//! This module provides the SMS transport used to deliver rendered
//! verification messages.
//!
//! ## Features
//!
//! - **AWS SNS**: Direct publish to a phone number
//! - **Delivery options**: Message type, sender id and origination short code
//! - **Security**: Phone number masking in logs, message bodies never logged

pub mod aws_sns;

pub use aws_sns::{
    AwsSnsSmsTransport, ORIGINATION_NUMBER_ATTRIBUTE, SENDER_ID_ATTRIBUTE, SMS_TYPE_ATTRIBUTE,
};

#[cfg(test)]
mod tests;
