//! Mock implementation of HistoryRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::HistoryRecord;
use crate::errors::{AppError, AppErrorKind, AppResult};

use super::r#trait::HistoryRepository;
use super::store::HistoryItem;

/// One recorded count/find call: key and cutoff
pub type HistoryLookup = (String, Option<i64>);

/// Mock implementation of HistoryRepository for testing
pub struct MockHistoryRepository {
    records: Arc<Mutex<Vec<HistoryRecord>>>,
    lookups: Arc<Mutex<Vec<HistoryLookup>>>,
    recent_attempts: Arc<Mutex<u64>>,
    should_fail_save: Arc<Mutex<bool>>,
    should_fail_count: Arc<Mutex<bool>>,
}

impl MockHistoryRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            lookups: Arc::new(Mutex::new(Vec::new())),
            recent_attempts: Arc::new(Mutex::new(0)),
            should_fail_save: Arc::new(Mutex::new(false)),
            should_fail_count: Arc::new(Mutex::new(false)),
        }
    }

    /// Count returned by every count call
    pub fn set_recent_attempts(&self, count: u64) {
        *self.recent_attempts.lock().unwrap() = count;
    }

    /// Set whether saves should fail
    pub fn set_should_fail_save(&self, should_fail: bool) {
        *self.should_fail_save.lock().unwrap() = should_fail;
    }

    /// Set whether counts and finds should fail
    pub fn set_should_fail_count(&self, should_fail: bool) {
        *self.should_fail_count.lock().unwrap() = should_fail;
    }

    /// Records passed to `save`, including failed ones
    pub fn saved_records(&self) -> Vec<HistoryRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Keys and cutoffs passed to count/find calls
    pub fn lookups(&self) -> Vec<HistoryLookup> {
        self.lookups.lock().unwrap().clone()
    }

    fn record_lookup(&self, key: &str, since_epoch: Option<i64>) -> AppResult<()> {
        self.lookups
            .lock()
            .unwrap()
            .push((key.to_string(), since_epoch));

        if *self.should_fail_count.lock().unwrap() {
            return Err(AppError::system(
                AppErrorKind::Unknown,
                "Mock history query error",
            ));
        }
        Ok(())
    }
}

impl Default for MockHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn save(&self, record: &HistoryRecord) -> AppResult<()> {
        self.records.lock().unwrap().push(record.clone());

        if *self.should_fail_save.lock().unwrap() {
            return Err(AppError::system(
                AppErrorKind::Unknown,
                "Mock history save error",
            ));
        }
        Ok(())
    }

    async fn count_by_user_id(&self, user_id: &str, since_epoch: Option<i64>) -> AppResult<u64> {
        self.record_lookup(user_id, since_epoch)?;
        Ok(*self.recent_attempts.lock().unwrap())
    }

    async fn count_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<u64> {
        self.record_lookup(phone_number, since_epoch)?;
        Ok(*self.recent_attempts.lock().unwrap())
    }

    async fn find_by_user_id(
        &self,
        user_id: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>> {
        self.record_lookup(user_id, since_epoch)?;
        Ok(Vec::new())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
        since_epoch: Option<i64>,
    ) -> AppResult<Vec<HistoryItem>> {
        self.record_lookup(phone_number, since_epoch)?;
        Ok(Vec::new())
    }
}
