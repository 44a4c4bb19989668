//! History repository over a key/value store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use cms_shared::config::HistoryTableConfig;
use cms_shared::phone::mask_phone_number;

use crate::domain::entities::HistoryRecord;
use crate::errors::AppResult;

use super::r#trait::HistoryRepository;
use super::store::{
    AttributeValue, HistoryItem, HistoryStore, PutItemRequest, QueryOutput, QueryRequest,
    QuerySelect,
};

/// Secondary index keyed by user id
pub const USER_ID_INDEX: &str = "userSid-index";
/// Secondary index keyed by phone number
pub const PHONE_NUMBER_INDEX: &str = "userPhoneNumber-index";

const SENT_AT_EPOCH_CONDITION: &str = "sentAtEpoch >= :sentAtEpoch";
const SENT_AT_EPOCH_VALUE: &str = ":sentAtEpoch";

/// Which secondary index a lookup goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryIndex {
    UserId,
    PhoneNumber,
}

impl HistoryIndex {
    pub fn index_name(&self) -> &'static str {
        match self {
            Self::UserId => USER_ID_INDEX,
            Self::PhoneNumber => PHONE_NUMBER_INDEX,
        }
    }

    /// Partition key attribute of the index
    pub fn key_attribute(&self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::PhoneNumber => "userPhoneNumber",
        }
    }
}

/// History repository that owns the item layout and query construction.
///
/// Every read fails open: a store error is logged and reported as zero
/// attempts (or no items), and a failed write is logged and dropped.
pub struct StoreHistoryRepository<S: HistoryStore> {
    store: Arc<S>,
    table_name: String,
    ttl_length_in_minutes: u64,
}

impl<S: HistoryStore> StoreHistoryRepository<S> {
    pub fn new(store: Arc<S>, config: &HistoryTableConfig) -> Self {
        Self {
            store,
            table_name: config.name.clone(),
            ttl_length_in_minutes: config.ttl_length,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Stored layout of a record
    pub fn build_item(&self, record: &HistoryRecord) -> HistoryItem {
        let sent_at_epoch = record.sent_at_epoch();
        let mut item = HashMap::new();

        item.insert("historyId".to_string(), AttributeValue::S(record.history_id()));
        item.insert(
            "type".to_string(),
            AttributeValue::S(record.record_type.as_str().to_string()),
        );
        item.insert("trigger".to_string(), AttributeValue::S(record.trigger.clone()));
        item.insert("userId".to_string(), AttributeValue::S(record.user_id.clone()));
        item.insert(
            "userEmailAddress".to_string(),
            AttributeValue::S(record.user_email_address.clone()),
        );
        item.insert(
            "userPhoneNumber".to_string(),
            AttributeValue::S(record.user_phone_number.clone()),
        );
        item.insert(
            "userPhoneNumberCountry".to_string(),
            AttributeValue::S(record.user_phone_number_country.clone()),
        );
        item.insert(
            "sentAt".to_string(),
            AttributeValue::S(record.sent_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        item.insert(
            "sentAtEpoch".to_string(),
            AttributeValue::N(sent_at_epoch.to_string()),
        );
        item.insert(
            "ttl".to_string(),
            AttributeValue::N(record.expires_at(self.ttl_length_in_minutes).to_string()),
        );

        item
    }

    /// Query on one index, optionally limited to attempts at or after `since_epoch`
    pub fn build_query(
        &self,
        index: HistoryIndex,
        key: &str,
        since_epoch: Option<i64>,
        select: QuerySelect,
    ) -> QueryRequest {
        let key_attribute = index.key_attribute();
        let key_placeholder = format!(":{}", key_attribute);

        let mut key_condition_expression = format!("{} = {}", key_attribute, key_placeholder);
        let mut expression_attribute_values = HashMap::new();
        expression_attribute_values.insert(key_placeholder, AttributeValue::S(key.to_string()));

        if let Some(since) = since_epoch {
            key_condition_expression = format!(
                "{} AND {}",
                key_condition_expression, SENT_AT_EPOCH_CONDITION
            );
            expression_attribute_values.insert(
                SENT_AT_EPOCH_VALUE.to_string(),
                AttributeValue::N(since.to_string()),
            );
        }

        QueryRequest {
            table_name: self.table_name.clone(),
            index_name: index.index_name().to_string(),
            key_condition_expression,
            expression_attribute_values,
            select,
        }
    }

    async fn run_query(&self, request: QueryRequest) -> Option<QueryOutput> {
        let index_name = request.index_name.clone();
        match self.store.query(request).await {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    index = %index_name,
                    event = "history_query_failed",
                    "Failed to query delivery history"
                );
                None
            }
        }
    }

    async fn count(&self, index: HistoryIndex, key: &str, since_epoch: Option<i64>) -> u64 {
        let request = self.build_query(index, key, since_epoch, QuerySelect::Count);
        let count = self
            .run_query(request)
            .await
            .map(|output| output.count)
            .unwrap_or(0);

        tracing::debug!(
            index = index.index_name(),
            since_epoch = ?since_epoch,
            count = count,
            event = "history_count_completed",
            "History count completed"
        );
        count
    }

    async fn find(
        &self,
        index: HistoryIndex,
        key: &str,
        since_epoch: Option<i64>,
    ) -> Vec<HistoryItem> {
        let request = self.build_query(index, key, since_epoch, QuerySelect::AllAttributes);
        self.run_query(request)
            .await
            .map(|output| output.items)
            .unwrap_or_default()
    }
}

#[async_trait]
impl<S: HistoryStore> HistoryRepository for StoreHistoryRepository<S> {
    async fn save(&self, record: &HistoryRecord) -> AppResult<()> {
        let request = PutItemRequest {
            table_name: self.table_name.clone(),
            item: self.build_item(record),
        };

        match self.store.put_item(request).await {
            Ok(()) => {
                tracing::debug!(
                    history_id = %record.history_id(),
                    trigger = %record.trigger,
                    phone = %mask_phone_number(&record.user_phone_number),
                    event = "history_saved",
                    "Saved delivery history"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    history_id = %record.history_id(),
                    event = "history_save_failed",
                    "Failed to save delivery history"
                );
            }
        }
        Ok(())
    }

    async fn count_by_user_id(&self, user_id: &str, since_epoch: Option<i64>) -> AppResult<u64> {
        Ok(self.count(HistoryIndex::UserId, user_id, since_epoch).await)
    }

    async fn count_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<u64> {
        Ok(self
            .count(HistoryIndex::PhoneNumber, phone_number, since_epoch)
            .await)
    }

    async fn find_by_user_id(
        &self,
        user_id: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>> {
        Ok(self.find(HistoryIndex::UserId, user_id, since_epoch).await)
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>> {
        Ok(self
            .find(HistoryIndex::PhoneNumber, phone_number, since_epoch)
            .await)
    }
}
