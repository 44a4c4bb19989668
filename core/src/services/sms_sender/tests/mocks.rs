//! Mock implementations for testing the SMS sender

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::value_objects::{
    AllowedMessage, PolicyDecision, PolicyDecisionRequest, SmsMessagePayload,
};
use crate::errors::{AppError, AppErrorKind, AppResult};
use crate::services::policy::PolicyEngine;
use crate::services::sms_sender::{CodeDecrypter, MessageTransport};

// Mock decrypter mapping ciphertexts to plaintexts
pub struct MockDecrypter {
    pub codes: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub should_fail: bool,
}

impl MockDecrypter {
    pub fn new(should_fail: bool) -> Self {
        Self {
            codes: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn with_code(mut self, ciphertext: &str, plaintext: &str) -> Self {
        self.codes.insert(ciphertext.to_string(), plaintext.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDecrypter for MockDecrypter {
    async fn decrypt(&self, ciphertext: &str) -> AppResult<String> {
        self.calls.lock().unwrap().push(ciphertext.to_string());
        if self.should_fail {
            return Err(AppError::system(
                AppErrorKind::DecryptionFailed,
                "Mock decryption error",
            ));
        }
        self.codes.get(ciphertext).cloned().ok_or_else(|| {
            AppError::system(AppErrorKind::DecryptionFailed, "unknown ciphertext")
        })
    }
}

// Mock SMS transport recording every payload
pub struct MockSmsTransport {
    pub sent: Arc<Mutex<Vec<SmsMessagePayload>>>,
    pub should_fail: bool,
}

impl MockSmsTransport {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_messages(&self) -> Vec<SmsMessagePayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageTransport<SmsMessagePayload> for MockSmsTransport {
    async fn send(&self, payload: &SmsMessagePayload) -> AppResult<()> {
        self.sent.lock().unwrap().push(payload.clone());
        if self.should_fail {
            return Err(AppError::system(
                AppErrorKind::SmsSendingFailed,
                "Mock transport error",
            ));
        }
        Ok(())
    }
}

// Mock policy engine returning a fixed verdict
pub struct MockPolicyEngine {
    pub decision: PolicyDecision,
    pub requests: Arc<Mutex<Vec<PolicyDecisionRequest>>>,
    pub should_fail: bool,
}

impl MockPolicyEngine {
    pub fn new(decision: PolicyDecision) -> Self {
        Self {
            decision,
            requests: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn allowing(message: &str) -> Self {
        Self::new(PolicyDecision::allow(AllowedMessage {
            message: message.to_string(),
            message_type: None,
            sender_id: None,
            short_code: None,
        }))
    }

    pub fn blocking(reason: Option<&str>) -> Self {
        Self::new(PolicyDecision::block(reason.map(str::to_string)))
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::blocking(None)
        }
    }

    pub fn requests(&self) -> Vec<PolicyDecisionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicyEngine for MockPolicyEngine {
    async fn evaluate(&self, request: &PolicyDecisionRequest) -> AppResult<PolicyDecision> {
        self.requests.lock().unwrap().push(request.clone());
        if self.should_fail {
            return Err(AppError::system(
                AppErrorKind::PolicyEvaluationFailed,
                "Mock policy error",
            ));
        }
        Ok(self.decision.clone())
    }
}
