//! Unit tests for the SMS sender

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{SmsSenderTrigger, UserAttributes, MINUTE_IN_MILLIS};
use crate::domain::value_objects::{
    AllowedMessage, PolicyDecision, SmsMessageType, BLOCK_REASON_FALLBACK,
};
use crate::errors::AppErrorKind;
use crate::repositories::MockHistoryRepository;
use crate::services::sms_sender::{MessageSender, SmsSender, SmsSenderConfig};

use super::mocks::{MockDecrypter, MockPolicyEngine, MockSmsTransport};

type TestSender = SmsSender<MockDecrypter, MockSmsTransport, MockHistoryRepository, MockPolicyEngine>;

struct Harness {
    decrypter: Arc<MockDecrypter>,
    transport: Arc<MockSmsTransport>,
    history: Arc<MockHistoryRepository>,
    policy: Arc<MockPolicyEngine>,
    sender: TestSender,
}

fn harness_with(
    decrypter: MockDecrypter,
    transport: MockSmsTransport,
    history: MockHistoryRepository,
    policy: MockPolicyEngine,
    config: SmsSenderConfig,
) -> Harness {
    let decrypter = Arc::new(decrypter);
    let transport = Arc::new(transport);
    let history = Arc::new(history);
    let policy = Arc::new(policy);
    let sender = SmsSender::new(
        decrypter.clone(),
        transport.clone(),
        history.clone(),
        policy.clone(),
        config,
    );
    Harness {
        decrypter,
        transport,
        history,
        policy,
        sender,
    }
}

fn harness(policy: MockPolicyEngine) -> Harness {
    harness_with(
        MockDecrypter::new(false).with_code("ABC123", "4821"),
        MockSmsTransport::new(false),
        MockHistoryRepository::new(),
        policy,
        SmsSenderConfig::default(),
    )
}

fn user_attributes() -> UserAttributes {
    UserAttributes::new()
        .with("sub", "abc123")
        .with("email", "foobar@email.com")
        .with("phone_number", "+18135555555")
}

#[tokio::test]
async fn test_disabled_sender_short_circuits() {
    let h = harness_with(
        MockDecrypter::new(false),
        MockSmsTransport::new(false),
        MockHistoryRepository::new(),
        MockPolicyEngine::allowing("hello"),
        SmsSenderConfig {
            enabled: false,
            ..SmsSenderConfig::default()
        },
    );

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), Some("ABC123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::ServiceNotEnabled);
    assert!(err.is_input());
    assert!(h.history.saved_records().is_empty());
    assert!(h.history.lookups().is_empty());
    assert!(h.policy.requests().is_empty());
    assert_eq!(h.decrypter.call_count(), 0);
    assert!(h.transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_invalid_phone_number_rejected_before_side_effects() {
    let h = harness(MockPolicyEngine::allowing("hello"));
    let attrs = UserAttributes::new().with("phone_number", "invalid-phone-number");

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &attrs, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::UserPhoneNumberIsInvalid);
    assert!(err.is_input());
    assert!(h.history.saved_records().is_empty());
    assert!(h.policy.requests().is_empty());
    assert!(h.transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_missing_phone_number_rejected() {
    let h = harness(MockPolicyEngine::allowing("hello"));
    let attrs = UserAttributes::new().with("sub", "abc123");

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &attrs, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::UserPhoneNumberIsInvalid);
    assert!(h.history.saved_records().is_empty());
}

#[tokio::test]
async fn test_blocked_message_uses_policy_reason() {
    let h = harness(MockPolicyEngine::blocking(Some("too many attempts")));

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), Some("ABC123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::MessageBlocked);
    assert!(err.is_input());
    assert_eq!(err.message(), "too many attempts");
    assert_eq!(h.decrypter.call_count(), 0);
    assert!(h.transport.sent_messages().is_empty());
    // the attempt is still recorded
    assert_eq!(h.history.saved_records().len(), 1);
}

#[tokio::test]
async fn test_blocked_message_without_reason_uses_fallback() {
    let h = harness(MockPolicyEngine::blocking(None));

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::MessageBlocked);
    assert_eq!(err.message(), BLOCK_REASON_FALLBACK);
    assert!(h.transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_allow_without_code_sends_template_verbatim() {
    let h = harness(MockPolicyEngine::allowing("Your code is {####}"));

    h.sender
        .send(SmsSenderTrigger::AdminCreateUser, &user_attributes(), None)
        .await
        .unwrap();

    let sent = h.transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "Your code is {####}");
    assert_eq!(h.decrypter.call_count(), 0);
}

#[tokio::test]
async fn test_allow_with_code_substitutes_first_placeholder_once() {
    let h = harness(MockPolicyEngine::allowing("{####} is your code, not {####}"));

    h.sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), Some("ABC123"))
        .await
        .unwrap();

    let sent = h.transport.sent_messages();
    assert_eq!(sent[0].message, "4821 is your code, not {####}");
    assert_eq!(h.decrypter.call_count(), 1);
    assert_eq!(h.decrypter.calls.lock().unwrap()[0], "ABC123");
}

#[tokio::test]
async fn test_payload_carries_policy_delivery_options() {
    let h = harness(MockPolicyEngine::new(PolicyDecision::allow(AllowedMessage {
        message: "hello".to_string(),
        message_type: Some(SmsMessageType::Promotional),
        sender_id: Some("ACME".to_string()),
        short_code: Some(String::new()),
    })));

    h.sender
        .send(SmsSenderTrigger::Authentication, &user_attributes(), None)
        .await
        .unwrap();

    let sent = h.transport.sent_messages();
    assert_eq!(sent[0].destination, "+18135555555");
    assert_eq!(sent[0].message_type, SmsMessageType::Promotional);
    assert_eq!(sent[0].sender_id.as_deref(), Some("ACME"));
    // empty short code is treated as absent
    assert_eq!(sent[0].short_code, None);
}

#[tokio::test]
async fn test_message_type_defaults_to_transactional() {
    let h = harness(MockPolicyEngine::allowing("hello"));

    h.sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap();

    assert_eq!(
        h.transport.sent_messages()[0].message_type,
        SmsMessageType::Transactional
    );
}

#[tokio::test]
async fn test_history_count_failure_degrades_to_zero() {
    let history = MockHistoryRepository::new();
    history.set_should_fail_count(true);
    let h = harness_with(
        MockDecrypter::new(false),
        MockSmsTransport::new(false),
        history,
        MockPolicyEngine::allowing("hello"),
        SmsSenderConfig::default(),
    );

    h.sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap();

    let requests = h.policy.requests();
    assert_eq!(requests[0].history.recent_attempts, 0);
    assert_eq!(h.transport.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_history_save_failure_still_dispatches() {
    let history = MockHistoryRepository::new();
    history.set_should_fail_save(true);
    let h = harness_with(
        MockDecrypter::new(false),
        MockSmsTransport::new(false),
        history,
        MockPolicyEngine::allowing("hello"),
        SmsSenderConfig::default(),
    );

    let result = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await;

    assert!(result.is_ok());
    assert_eq!(h.history.saved_records().len(), 1);
    assert_eq!(h.transport.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_recent_attempts_passed_to_policy() {
    let h = harness(MockPolicyEngine::allowing("hello"));
    h.history.set_recent_attempts(4);

    h.sender
        .send(SmsSenderTrigger::ResendCode, &user_attributes(), None)
        .await
        .unwrap();

    let request = &h.policy.requests()[0];
    assert_eq!(request.history.recent_attempts, 4);
    assert_eq!(request.trigger, SmsSenderTrigger::ResendCode);
    assert_eq!(request.phone_number_data.iso_country, "US");
    assert_eq!(request.user_attributes, user_attributes());
}

#[tokio::test]
async fn test_throttle_window_counts_by_phone_since_cutoff() {
    let h = harness(MockPolicyEngine::allowing("hello"));
    let window = 15 * MINUTE_IN_MILLIS;

    let before = Utc::now().timestamp_millis();
    h.sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap();
    let after = Utc::now().timestamp_millis();

    let lookups = h.history.lookups();
    assert_eq!(lookups.len(), 1);
    let (key, since) = &lookups[0];
    assert_eq!(key, "+18135555555");
    let since = since.unwrap();
    assert!(since >= before - window && since <= after - window);
}

#[tokio::test]
async fn test_history_record_contents() {
    let h = harness(MockPolicyEngine::allowing("hello"));

    h.sender
        .send(SmsSenderTrigger::ForgotPassword, &user_attributes(), None)
        .await
        .unwrap();

    let records = h.history.saved_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trigger, "CustomSMSSender_ForgotPassword");
    assert_eq!(records[0].user_id, "abc123");
    assert_eq!(records[0].user_email_address, "foobar@email.com");
    assert_eq!(records[0].user_phone_number, "+18135555555");
    assert_eq!(records[0].user_phone_number_country, "US");
}

#[tokio::test]
async fn test_decryption_failure_propagates() {
    let h = harness_with(
        MockDecrypter::new(true),
        MockSmsTransport::new(false),
        MockHistoryRepository::new(),
        MockPolicyEngine::allowing("Your code is {####}"),
        SmsSenderConfig::default(),
    );

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), Some("ABC123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::DecryptionFailed);
    assert!(!err.is_input());
    assert!(h.transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let h = harness_with(
        MockDecrypter::new(false),
        MockSmsTransport::new(true),
        MockHistoryRepository::new(),
        MockPolicyEngine::allowing("hello"),
        SmsSenderConfig::default(),
    );

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::SmsSendingFailed);
    assert!(!err.is_input());
}

#[tokio::test]
async fn test_policy_failure_propagates() {
    let h = harness(MockPolicyEngine::failing());

    let err = h
        .sender
        .send(SmsSenderTrigger::SignUp, &user_attributes(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AppErrorKind::PolicyEvaluationFailed);
    assert!(!err.is_input());
    assert!(h.transport.sent_messages().is_empty());
}
