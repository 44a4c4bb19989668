//! Key/value store collaborator used by the history repository.
//!
//! The repository owns the item layout and the query construction; a store
//! only has to execute the two requests below against its backend.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::AppResult;

/// A single attribute value as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// String attribute
    S(String),
    /// Number attribute, kept in its decimal string form
    N(String),
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            Self::N(_) => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(value) => Some(value),
            Self::S(_) => None,
        }
    }
}

/// Stored item, attribute name to value
pub type HistoryItem = HashMap<String, AttributeValue>;

/// Insert-one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: HistoryItem,
}

/// What a query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySelect {
    /// Only the number of matching items
    Count,
    /// The matching items with every attribute
    AllAttributes,
}

impl QuerySelect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::AllAttributes => "ALL_ATTRIBUTES",
        }
    }
}

/// Query against a secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub table_name: String,
    pub index_name: String,
    pub key_condition_expression: String,
    pub expression_attribute_values: HashMap<String, AttributeValue>,
    pub select: QuerySelect,
}

/// Query result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    /// Number of matching items
    pub count: u64,
    /// Matching items; empty for count-only queries
    pub items: Vec<HistoryItem>,
}

/// Backend executing history store requests
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one item
    async fn put_item(&self, request: PutItemRequest) -> AppResult<()>;

    /// Run a query on a secondary index
    async fn query(&self, request: QueryRequest) -> AppResult<QueryOutput>;
}
