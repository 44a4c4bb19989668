//! Repository interfaces and implementations.

pub mod history;

pub use history::{
    AttributeValue, HistoryItem, HistoryRepository, HistoryStore, MockHistoryRepository,
    PutItemRequest, QueryOutput, QueryRequest, QuerySelect, StoreHistoryRepository,
};
