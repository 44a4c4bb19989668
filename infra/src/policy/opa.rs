//! OPA WebAssembly policy runtime
//!
//! Runs policies compiled with `opa build -t wasm` through the `opa-wasm`
//! crate, which supplies the host side of the OPA wasm ABI including the
//! builtins a policy may call (`sprintf`, `time.now_ns`, ...).

use async_trait::async_trait;
use opa_wasm::wasmtime::{Config, Engine, Module, Store};
use opa_wasm::{DefaultContext, Policy, Runtime};
use serde_json::Value;
use std::collections::HashSet;
use tokio::sync::Mutex;

use cms_core::errors::AppResult;
use cms_core::services::{LoadedPolicy, PolicyLoader};

use crate::InfrastructureError;

fn policy_error(context: &str, err: impl std::fmt::Display) -> InfrastructureError {
    InfrastructureError::Policy(format!("{}: {:#}", context, err))
}

/// Loads compiled OPA policies
pub struct OpaWasmLoader {
    engine: Engine,
    entrypoint: Option<String>,
}

impl OpaWasmLoader {
    /// Loader evaluating the artifact's only entrypoint
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut config = Config::new();
        config.async_support(true);
        let engine = Engine::new(&config).map_err(|e| policy_error("failed to create policy engine", e))?;

        Ok(Self {
            engine,
            entrypoint: None,
        })
    }

    /// Evaluate a named entrypoint instead of the artifact's only one
    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into()).filter(|name: &String| !name.is_empty());
        self
    }
}

#[async_trait]
impl PolicyLoader for OpaWasmLoader {
    async fn load(&self, artifact: &[u8]) -> AppResult<Box<dyn LoadedPolicy>> {
        let policy = OpaWasmPolicy::instantiate(&self.engine, artifact, self.entrypoint.as_deref()).await?;
        Ok(Box::new(policy))
    }
}

/// Pick the entrypoint to evaluate.
///
/// A requested name must exist; without one the artifact must have exactly
/// one entrypoint.
pub fn select_entrypoint(
    available: &HashSet<&str>,
    requested: Option<&str>,
) -> Result<String, InfrastructureError> {
    match requested {
        Some(name) if available.contains(name) => Ok(name.to_string()),
        Some(name) => Err(InfrastructureError::Policy(format!(
            "policy has no entrypoint {}",
            name
        ))),
        None => {
            let mut names = available.iter();
            match (names.next(), names.next()) {
                (Some(name), None) => Ok(name.to_string()),
                (None, _) => Err(InfrastructureError::Policy("policy has no entrypoint".to_string())),
                _ => {
                    let mut all: Vec<&str> = available.iter().copied().collect();
                    all.sort_unstable();
                    Err(InfrastructureError::Policy(format!(
                        "policy has several entrypoints ({}), one must be configured",
                        all.join(", ")
                    )))
                }
            }
        }
    }
}

struct OpaInstance {
    store: Store<()>,
    policy: Policy<DefaultContext>,
}

/// An instantiated OPA policy
pub struct OpaWasmPolicy {
    entrypoint: String,
    instance: Mutex<OpaInstance>,
}

impl OpaWasmPolicy {
    /// Compile and instantiate a policy module with an empty data document
    pub async fn instantiate(
        engine: &Engine,
        artifact: &[u8],
        entrypoint: Option<&str>,
    ) -> Result<Self, InfrastructureError> {
        let module = Module::new(engine, artifact).map_err(|e| policy_error("invalid policy module", e))?;
        let mut store = Store::new(engine, ());

        let runtime = Runtime::new(&mut store, &module)
            .await
            .map_err(|e| policy_error("failed to instantiate policy", e))?;
        let entrypoint = select_entrypoint(&runtime.entrypoints(), entrypoint)?;

        let policy = runtime
            .with_data(&mut store, &Value::Object(Default::default()))
            .await
            .map_err(|e| policy_error("failed to load policy data", e))?;

        tracing::debug!(entrypoint = %entrypoint, event = "policy_instantiated", "Policy instantiated");

        Ok(Self {
            entrypoint,
            instance: Mutex::new(OpaInstance { store, policy }),
        })
    }

    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }
}

/// First result of an OPA result set (`[{"result": ...}]`)
pub fn first_result(result_set: Value) -> Result<Value, InfrastructureError> {
    match result_set {
        Value::Array(mut results) if !results.is_empty() => match results.swap_remove(0) {
            Value::Object(mut entry) => entry
                .remove("result")
                .ok_or_else(|| InfrastructureError::Policy("policy result set entry has no result".to_string())),
            _ => Err(InfrastructureError::Policy("malformed policy result set".to_string())),
        },
        Value::Array(_) => Err(InfrastructureError::Policy("policy returned an empty result set".to_string())),
        _ => Err(InfrastructureError::Policy("malformed policy result set".to_string())),
    }
}

#[async_trait]
impl LoadedPolicy for OpaWasmPolicy {
    async fn evaluate(&self, input: &Value) -> AppResult<Value> {
        let mut guard = self.instance.lock().await;
        let instance = &mut *guard;

        let result_set: Value = instance
            .policy
            .evaluate(&mut instance.store, &self.entrypoint, input)
            .await
            .map_err(|e| policy_error("policy evaluation failed", e))?;

        Ok(first_result(result_set)?)
    }
}
