//! Tests for DynamoDB attribute translation

use aws_sdk_dynamodb::types::{AttributeValue as DdbAttributeValue, Select};
use std::collections::HashMap;

use cms_core::repositories::{AttributeValue, QuerySelect};

use crate::database::dynamodb::{from_sdk_item, to_sdk_item, to_sdk_select};

#[test]
fn test_item_translates_string_and_number_attributes() {
    let item = HashMap::from([
        ("userId".to_string(), AttributeValue::S("abc123".to_string())),
        ("sentAtEpoch".to_string(), AttributeValue::N("100000".to_string())),
    ]);

    let sdk_item = to_sdk_item(&item);

    assert_eq!(sdk_item["userId"], DdbAttributeValue::S("abc123".to_string()));
    assert_eq!(sdk_item["sentAtEpoch"], DdbAttributeValue::N("100000".to_string()));
    assert_eq!(from_sdk_item(&sdk_item), item);
}

#[test]
fn test_unsupported_attribute_types_are_skipped() {
    let sdk_item = HashMap::from([
        ("userId".to_string(), DdbAttributeValue::S("abc123".to_string())),
        ("flag".to_string(), DdbAttributeValue::Bool(true)),
    ]);

    let item = from_sdk_item(&sdk_item);

    assert_eq!(item.len(), 1);
    assert_eq!(item["userId"], AttributeValue::S("abc123".to_string()));
}

#[test]
fn test_select_translation() {
    assert_eq!(to_sdk_select(QuerySelect::Count), Select::Count);
    assert_eq!(to_sdk_select(QuerySelect::AllAttributes), Select::AllAttributes);
}
