//! SMS sender orchestrator

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use cms_shared::phone::mask_phone_number;

use crate::domain::entities::{
    HistoryRecord, NormalizedPhoneNumber, SmsSenderTrigger, UserAttributes, MINUTE_IN_MILLIS,
};
use crate::domain::value_objects::{
    AllowedMessage, PolicyDecisionRequest, PolicyHistory, SmsMessagePayload,
};
use crate::errors::{AppError, AppErrorKind, AppResult};
use crate::repositories::HistoryRepository;
use crate::services::policy::PolicyEngine;

use super::config::SmsSenderConfig;
use super::traits::{CodeDecrypter, MessageSender, MessageTransport};

/// Placeholder in the policy template replaced by the one-time code
pub const CODE_PLACEHOLDER: &str = "{####}";

/// Policy-gated SMS sender.
///
/// One call to [`MessageSender::send`] runs the whole pipeline for a
/// trigger: enablement check, phone validation, best-effort history write,
/// recent-attempt count, policy evaluation, code substitution and dispatch.
pub struct SmsSender<D, T, H, P>
where
    D: CodeDecrypter,
    T: MessageTransport<SmsMessagePayload>,
    H: HistoryRepository,
    P: PolicyEngine,
{
    /// Decrypts provider-supplied codes
    decrypter: Arc<D>,
    /// SMS transport
    transport: Arc<T>,
    /// Delivery history
    history: Arc<H>,
    /// Policy decision point
    policy: Arc<P>,
    /// Sender configuration
    config: SmsSenderConfig,
}

impl<D, T, H, P> SmsSender<D, T, H, P>
where
    D: CodeDecrypter,
    T: MessageTransport<SmsMessagePayload>,
    H: HistoryRepository,
    P: PolicyEngine,
{
    /// Create a new SMS sender
    ///
    /// # Arguments
    ///
    /// * `decrypter` - Code decrypter implementation
    /// * `transport` - SMS transport implementation
    /// * `history` - History repository implementation
    /// * `policy` - Policy engine implementation
    /// * `config` - Sender configuration
    pub fn new(
        decrypter: Arc<D>,
        transport: Arc<T>,
        history: Arc<H>,
        policy: Arc<P>,
        config: SmsSenderConfig,
    ) -> Self {
        Self {
            decrypter,
            transport,
            history,
            policy,
            config,
        }
    }

    pub fn config(&self) -> &SmsSenderConfig {
        &self.config
    }

    fn user_phone_number(user_attributes: &UserAttributes) -> AppResult<NormalizedPhoneNumber> {
        NormalizedPhoneNumber::parse(user_attributes.phone_number().unwrap_or_default())
    }

    async fn record_history(
        &self,
        trigger: SmsSenderTrigger,
        user_attributes: &UserAttributes,
        phone: &NormalizedPhoneNumber,
    ) {
        let record = HistoryRecord::for_sms(trigger, user_attributes, phone);
        if let Err(e) = self.history.save(&record).await {
            tracing::error!(
                error = %e,
                phone = %mask_phone_number(&phone.e164_number),
                event = "history_save_failed",
                "Failed to record delivery history"
            );
        }
    }

    /// Attempts for the phone number within the throttle window; 0 when unknown
    async fn recent_attempts(&self, phone: &NormalizedPhoneNumber) -> u64 {
        let window = i64::try_from(self.config.throttle_period_in_minutes)
            .unwrap_or(i64::MAX)
            .saturating_mul(MINUTE_IN_MILLIS);
        let since_epoch = Utc::now().timestamp_millis().saturating_sub(window);

        match self
            .history
            .count_by_phone_number(&phone.e164_number, Some(since_epoch))
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    phone = %mask_phone_number(&phone.e164_number),
                    event = "history_count_failed",
                    "Failed to count recent attempts, assuming none"
                );
                0
            }
        }
    }

    async fn evaluate_policy(
        &self,
        trigger: SmsSenderTrigger,
        user_attributes: &UserAttributes,
        phone: &NormalizedPhoneNumber,
    ) -> AppResult<AllowedMessage> {
        let request = PolicyDecisionRequest {
            trigger,
            user_attributes: user_attributes.clone(),
            phone_number_data: phone.clone(),
            history: PolicyHistory {
                recent_attempts: self.recent_attempts(phone).await,
            },
        };

        let decision = self.policy.evaluate(&request).await?;
        tracing::debug!(
            trigger = %trigger,
            action = ?decision.action,
            recent_attempts = request.history.recent_attempts,
            event = "policy_evaluated",
            "Policy evaluated"
        );
        decision.into_allowed()
    }

    /// Substitute the decrypted code into the first placeholder
    async fn render_message(&self, template: &str, encrypted_code: Option<&str>) -> AppResult<String> {
        match encrypted_code.filter(|code| !code.is_empty()) {
            Some(ciphertext) => {
                let code = self.decrypter.decrypt(ciphertext).await?;
                Ok(template.replacen(CODE_PLACEHOLDER, &code, 1))
            }
            None => Ok(template.to_string()),
        }
    }
}

#[async_trait]
impl<D, T, H, P> MessageSender for SmsSender<D, T, H, P>
where
    D: CodeDecrypter,
    T: MessageTransport<SmsMessagePayload>,
    H: HistoryRepository,
    P: PolicyEngine,
{
    async fn send(
        &self,
        trigger: SmsSenderTrigger,
        user_attributes: &UserAttributes,
        encrypted_code: Option<&str>,
    ) -> AppResult<()> {
        if !self.config.enabled {
            return Err(AppError::input(
                AppErrorKind::ServiceNotEnabled,
                "sms sender is not enabled",
            ));
        }

        let phone = Self::user_phone_number(user_attributes)?;
        self.record_history(trigger, user_attributes, &phone).await;

        let allowed = self.evaluate_policy(trigger, user_attributes, &phone).await?;
        let message = self.render_message(&allowed.message, encrypted_code).await?;

        let payload = SmsMessagePayload {
            destination: phone.e164_number.clone(),
            message,
            message_type: allowed.message_type.unwrap_or_default(),
            sender_id: allowed.sender_id.filter(|id| !id.is_empty()),
            short_code: allowed.short_code.filter(|code| !code.is_empty()),
        };
        self.transport.send(&payload).await?;

        tracing::info!(
            trigger = %trigger,
            phone = %mask_phone_number(&payload.destination),
            message_type = payload.message_type.as_str(),
            event = "sms_dispatched",
            "SMS dispatched"
        );
        Ok(())
    }
}
