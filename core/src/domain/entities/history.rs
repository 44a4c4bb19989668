//! Delivery history entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phone_number::NormalizedPhoneNumber;
use super::trigger::{MessageChannel, SmsSenderTrigger};
use super::user_attributes::UserAttributes;

pub const MINUTE_IN_MILLIS: i64 = 60 * 1000;

/// One recorded delivery attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Channel the attempt went through
    pub record_type: MessageChannel,
    /// Trigger wire name
    pub trigger: String,
    /// User id, empty when unknown
    pub user_id: String,
    /// Email address, empty when unknown
    pub user_email_address: String,
    /// E.164 phone number
    pub user_phone_number: String,
    /// ISO region of the phone number
    pub user_phone_number_country: String,
    /// When the attempt was made
    pub sent_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Build the record for an SMS attempt, stamped with the current time
    pub fn for_sms(
        trigger: SmsSenderTrigger,
        user_attributes: &UserAttributes,
        phone: &NormalizedPhoneNumber,
    ) -> Self {
        Self {
            record_type: MessageChannel::Sms,
            trigger: trigger.as_str().to_string(),
            user_id: user_attributes.sub().unwrap_or_default().to_string(),
            user_email_address: user_attributes.email().unwrap_or_default().to_string(),
            user_phone_number: phone.e164_number.clone(),
            user_phone_number_country: phone.iso_country.clone(),
            sent_at: Utc::now(),
        }
    }

    /// Send time in epoch milliseconds
    pub fn sent_at_epoch(&self) -> i64 {
        self.sent_at.timestamp_millis()
    }

    /// Expiry in epoch milliseconds after a retention window
    pub fn expires_at(&self, retention_minutes: u64) -> i64 {
        let retention_millis = i64::try_from(retention_minutes)
            .unwrap_or(i64::MAX)
            .saturating_mul(MINUTE_IN_MILLIS);
        self.sent_at_epoch().saturating_add(retention_millis)
    }

    /// Composite key of type, user id and send time
    pub fn history_id(&self) -> String {
        format!(
            "{}-{}-{}",
            self.record_type.as_str(),
            self.user_id,
            self.sent_at_epoch()
        )
    }
}
