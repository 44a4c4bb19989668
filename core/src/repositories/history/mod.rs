//! Delivery history repository module.

mod r#trait;
pub use r#trait::HistoryRepository;

mod store;
pub use store::{
    AttributeValue, HistoryItem, HistoryStore, PutItemRequest, QueryOutput, QueryRequest,
    QuerySelect,
};

mod repository;
pub use repository::{HistoryIndex, StoreHistoryRepository, PHONE_NUMBER_INDEX, USER_ID_INDEX};

mod mock;
pub use mock::{HistoryLookup, MockHistoryRepository};
