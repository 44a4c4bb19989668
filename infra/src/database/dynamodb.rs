//! DynamoDB history store
//!
//! Executes the put-item and query requests built by the history repository.
//! Only string and number attributes are used by the history layout; other
//! attribute types coming back from the table are skipped.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{AttributeValue as DdbAttributeValue, Select},
    Client as DynamoDbClient,
};
use std::collections::HashMap;

use cms_core::errors::AppResult;
use cms_core::repositories::{
    AttributeValue, HistoryItem, HistoryStore, PutItemRequest, QueryOutput, QueryRequest,
    QuerySelect,
};

use crate::InfrastructureError;

/// DynamoDB-backed history store
pub struct DynamoDbHistoryStore {
    client: DynamoDbClient,
}

impl DynamoDbHistoryStore {
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self::new(DynamoDbClient::new(config))
    }
}

pub(crate) fn to_sdk_value(value: &AttributeValue) -> DdbAttributeValue {
    match value {
        AttributeValue::S(value) => DdbAttributeValue::S(value.clone()),
        AttributeValue::N(value) => DdbAttributeValue::N(value.clone()),
    }
}

pub(crate) fn from_sdk_value(value: &DdbAttributeValue) -> Option<AttributeValue> {
    match value {
        DdbAttributeValue::S(value) => Some(AttributeValue::S(value.clone())),
        DdbAttributeValue::N(value) => Some(AttributeValue::N(value.clone())),
        _ => None,
    }
}

pub(crate) fn to_sdk_item(item: &HashMap<String, AttributeValue>) -> HashMap<String, DdbAttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

pub(crate) fn from_sdk_item(item: &HashMap<String, DdbAttributeValue>) -> HistoryItem {
    item.iter()
        .filter_map(|(name, value)| from_sdk_value(value).map(|value| (name.clone(), value)))
        .collect()
}

pub(crate) fn to_sdk_select(select: QuerySelect) -> Select {
    match select {
        QuerySelect::Count => Select::Count,
        QuerySelect::AllAttributes => Select::AllAttributes,
    }
}

#[async_trait]
impl HistoryStore for DynamoDbHistoryStore {
    async fn put_item(&self, request: PutItemRequest) -> AppResult<()> {
        self.client
            .put_item()
            .table_name(&request.table_name)
            .set_item(Some(to_sdk_item(&request.item)))
            .send()
            .await
            .map_err(|e| {
                InfrastructureError::Database(format!(
                    "put_item on {} failed: {}",
                    request.table_name,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn query(&self, request: QueryRequest) -> AppResult<QueryOutput> {
        let output = self
            .client
            .query()
            .table_name(&request.table_name)
            .index_name(&request.index_name)
            .key_condition_expression(&request.key_condition_expression)
            .set_expression_attribute_values(Some(to_sdk_item(
                &request.expression_attribute_values,
            )))
            .select(to_sdk_select(request.select))
            .send()
            .await
            .map_err(|e| {
                InfrastructureError::Database(format!(
                    "query on {} failed: {}",
                    request.index_name,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(QueryOutput {
            count: u64::try_from(output.count()).unwrap_or(0),
            items: output.items().iter().map(from_sdk_item).collect(),
        })
    }
}
