//! Traits for policy evaluation

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::{PolicyDecision, PolicyDecisionRequest};
use crate::errors::AppResult;

/// Decision point consulted before every send
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Evaluate a decision request into an allow/block verdict
    async fn evaluate(&self, request: &PolicyDecisionRequest) -> AppResult<PolicyDecision>;
}

/// Turns a compiled policy artifact into an evaluable policy
#[async_trait]
pub trait PolicyLoader: Send + Sync {
    async fn load(&self, artifact: &[u8]) -> AppResult<Box<dyn LoadedPolicy>>;
}

/// A policy ready for evaluation; a pure function of its JSON input
#[async_trait]
pub trait LoadedPolicy: Send + Sync {
    /// Evaluate the policy entrypoint and return its result document
    async fn evaluate(&self, input: &Value) -> AppResult<Value>;
}
