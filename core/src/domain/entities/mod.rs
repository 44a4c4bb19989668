//! Domain entities representing the objects flowing through the sender.

pub mod history;
pub mod phone_number;
pub mod trigger;
pub mod user_attributes;

// Re-export commonly used types
pub use history::{HistoryRecord, MINUTE_IN_MILLIS};
pub use phone_number::NormalizedPhoneNumber;
pub use trigger::{MessageChannel, SmsSenderTrigger, EMAIL_TRIGGER_PREFIX, SMS_TRIGGER_PREFIX};
pub use user_attributes::UserAttributes;
