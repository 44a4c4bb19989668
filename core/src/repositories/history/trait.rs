//! History repository trait defining the interface for delivery history access.

use async_trait::async_trait;

use crate::domain::entities::HistoryRecord;
use crate::errors::AppResult;

use super::store::HistoryItem;

/// Repository trait for delivery history.
///
/// Counts and lookups are scoped either by user id or by phone number, with
/// an optional `since_epoch` cutoff (epoch milliseconds, inclusive).
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append one attempt record
    async fn save(&self, record: &HistoryRecord) -> AppResult<()>;

    /// Number of attempts recorded for a user id
    async fn count_by_user_id(&self, user_id: &str, since_epoch: Option<i64>) -> AppResult<u64>;

    /// Number of attempts recorded for an E.164 phone number
    async fn count_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<u64>;

    /// Attempts recorded for a user id, all attributes
    async fn find_by_user_id(
        &self,
        user_id: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>>;

    /// Attempts recorded for an E.164 phone number, all attributes
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>>;
}
