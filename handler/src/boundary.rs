//! Trigger boundary
//!
//! Routes decoded events to a sender and enforces the error classes:
//! caller-input errors are logged as warnings and swallowed, system errors
//! are logged and returned to the runtime.

use std::sync::Arc;

use cms_core::domain::entities::{MessageChannel, SmsSenderTrigger};
use cms_core::errors::{AppError, AppErrorKind, AppResult};
use cms_core::services::MessageSender;
use cms_shared::phone::mask_phone_number;

use crate::event::CustomSenderEvent;

/// Where an event is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRoute {
    Sms(SmsSenderTrigger),
    Email,
    Unsupported,
}

impl TriggerRoute {
    /// Route a trigger source by its prefix
    pub fn from_source(source: &str) -> Self {
        match MessageChannel::from_source(source) {
            Some(MessageChannel::Sms) => SmsSenderTrigger::from_source(source)
                .map(Self::Sms)
                .unwrap_or(Self::Unsupported),
            Some(MessageChannel::Email) => Self::Email,
            None => Self::Unsupported,
        }
    }
}

/// Handles one decoded trigger event
pub struct TriggerBoundary {
    sms_sender: Arc<dyn MessageSender>,
    email_sender_enabled: bool,
}

impl TriggerBoundary {
    pub fn new(sms_sender: Arc<dyn MessageSender>, email_sender_enabled: bool) -> Self {
        Self {
            sms_sender,
            email_sender_enabled,
        }
    }

    /// Process an event. Only system-class failures are returned.
    pub async fn handle(&self, event: &CustomSenderEvent) -> AppResult<()> {
        tracing::debug!(
            trigger_source = %event.trigger_source,
            event = "trigger_received",
            "Custom sender triggered"
        );

        match self.dispatch(event).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_input() => {
                log_rejection(event, &err);
                Ok(())
            }
            Err(err) => {
                log_failure(event, &err);
                Err(err)
            }
        }
    }

    async fn dispatch(&self, event: &CustomSenderEvent) -> AppResult<()> {
        match TriggerRoute::from_source(&event.trigger_source) {
            TriggerRoute::Sms(trigger) => {
                self.sms_sender
                    .send(trigger, &event.request.user_attributes, event.encrypted_code())
                    .await
            }
            TriggerRoute::Email if !self.email_sender_enabled => Err(AppError::input(
                AppErrorKind::ServiceNotEnabled,
                "email sender is not enabled",
            )),
            TriggerRoute::Email => Err(AppError::input(
                AppErrorKind::NotImplemented,
                "email sender is not implemented",
            )),
            TriggerRoute::Unsupported => Err(AppError::input(
                AppErrorKind::NotImplemented,
                format!("unsupported trigger source: {}", event.trigger_source),
            )),
        }
    }
}

fn masked_phone(event: &CustomSenderEvent) -> String {
    event
        .request
        .user_attributes
        .phone_number()
        .map(mask_phone_number)
        .unwrap_or_default()
}

fn log_rejection(event: &CustomSenderEvent, err: &AppError) {
    tracing::warn!(
        error_kind = %err.kind(),
        trigger_source = %event.trigger_source,
        client_id = ?event.caller_context.client_id,
        region = %event.region,
        user_pool_id = %event.user_pool_id,
        user_name = ?event.user_name,
        user_id = ?event.request.user_attributes.sub(),
        phone = %masked_phone(event),
        has_code = event.request.code.is_some(),
        event = "trigger_rejected",
        "{}",
        err.message()
    );
}

fn log_failure(event: &CustomSenderEvent, err: &AppError) {
    tracing::error!(
        error_kind = %err.kind(),
        error = ?err,
        trigger_source = %event.trigger_source,
        client_id = ?event.caller_context.client_id,
        region = %event.region,
        user_pool_id = %event.user_pool_id,
        user_name = ?event.user_name,
        user_id = ?event.request.user_attributes.sub(),
        phone = %masked_phone(event),
        has_code = event.request.code.is_some(),
        event = "trigger_failed",
        "{}",
        err.message()
    );
}
