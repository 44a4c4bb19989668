//! Handler application: one-shot initialization and per-invocation entry point

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

use cms_core::errors::{AppError, AppErrorKind, AppResult};
use cms_core::repositories::StoreHistoryRepository;
use cms_core::services::{ArtifactPolicy, MessageSender, SmsSender, SmsSenderConfig};
use cms_shared::config::{EnvMap, RuntimeConfig, SenderConfig};

use crate::boundary::TriggerBoundary;
use crate::event::CustomSenderEvent;

/// Builds the SMS sender from a validated configuration
#[async_trait]
pub trait SenderFactory: Send + Sync {
    async fn build(&self, config: &SenderConfig) -> AppResult<Arc<dyn MessageSender>>;
}

/// Production factory wiring the AWS adapters and the OPA runtime
pub struct AwsSenderFactory;

#[async_trait]
impl SenderFactory for AwsSenderFactory {
    async fn build(&self, config: &SenderConfig) -> AppResult<Arc<dyn MessageSender>> {
        let infra = cms_infra::initialize(config).await?;

        let history = Arc::new(StoreHistoryRepository::new(
            infra.history_store.clone(),
            &config.history_table,
        ));
        let policy = Arc::new(ArtifactPolicy::new(
            config.sms_sender_policy_path.clone(),
            infra.policy_loader.clone(),
        ));

        let sender = SmsSender::new(
            infra.decrypter.clone(),
            infra.transport.clone(),
            history,
            policy,
            SmsSenderConfig::from(config),
        );
        Ok(Arc::new(sender))
    }
}

/// Source of the environment consulted on initialization
pub type EnvSource = Box<dyn Fn() -> EnvMap + Send + Sync>;

/// The trigger handler.
///
/// Configuration is validated and services are built on the first
/// invocation. A failed initialization is not cached, so the next invocation
/// tries again.
pub struct App<F: SenderFactory> {
    env: EnvSource,
    factory: F,
    boundary: OnceCell<TriggerBoundary>,
}

impl<F: SenderFactory> App<F> {
    pub fn new(env: EnvSource, factory: F) -> Self {
        Self {
            env,
            factory,
            boundary: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.boundary.initialized()
    }

    async fn boundary(&self) -> AppResult<&TriggerBoundary> {
        self.boundary
            .get_or_try_init(|| async {
                let mut runtime_config = RuntimeConfig::new();
                if let Err(err) = runtime_config.update(&(self.env)()) {
                    tracing::error!(
                        error_kind = %err.kind(),
                        event = "config_invalid",
                        "{}",
                        err.message()
                    );
                    return Err(err);
                }

                let config = runtime_config.snapshot().ok_or_else(|| {
                    AppError::system(AppErrorKind::Unknown, "configuration not ready after update")
                })?;
                tracing::info!(
                    key_id = %config.key_id,
                    history_table = %config.history_table.name,
                    history_ttl_minutes = config.history_table.ttl_length,
                    throttle_period_in_minutes = config.throttle_period_in_minutes,
                    sms_sender_enabled = config.sms_sender_enabled,
                    sms_sender_policy_path = %config.sms_sender_policy_path.display(),
                    sms_sender_policy_entrypoint = ?config.sms_sender_policy_entrypoint,
                    email_sender_enabled = config.email_sender_enabled,
                    event = "config_loaded",
                    "Config loaded"
                );

                let sms_sender = self.factory.build(config).await?;
                Ok(TriggerBoundary::new(sms_sender, config.email_sender_enabled))
            })
            .await
    }

    /// Handle one raw event; the event is echoed back on success
    pub async fn invoke(&self, payload: Value) -> AppResult<Value> {
        let boundary = self.boundary().await?;

        let event: CustomSenderEvent = serde_json::from_value(payload.clone()).map_err(|e| {
            tracing::error!(error = %e, event = "event_invalid", "Failed to decode trigger event");
            AppError::system(AppErrorKind::Unknown, "failed to decode trigger event").with_source(e)
        })?;

        boundary.handle(&event).await?;
        Ok(payload)
    }
}
