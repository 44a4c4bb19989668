//! User attributes supplied with a trigger

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const ATTR_SUB: &str = "sub";
pub const ATTR_EMAIL: &str = "email";
pub const ATTR_PHONE_NUMBER: &str = "phone_number";

/// Identity-provider user attributes.
///
/// Values are usually strings (`"true"`/`"false"` for verification flags) but
/// may be null; the map is forwarded to the policy untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAttributes(BTreeMap<String, Value>);

impl UserAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a string attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::String(value.into()));
        self
    }

    /// String value of an attribute; null, missing and non-string values are `None`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// User id (`sub`)
    pub fn sub(&self) -> Option<&str> {
        self.get_str(ATTR_SUB)
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str(ATTR_EMAIL)
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.get_str(ATTR_PHONE_NUMBER)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for UserAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
