// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use crate::envelope::AuthPayload;
use crate::errors::BrokerError;
use crate::traits::{AuthBackend, AuthOutcome, LogBackend, SecondaryCallObserver, AUTHENTICATED_RESULT};

/// What a [`StubAuthBackend`] answers
#[derive(Debug, Clone)]
pub enum StubAuthReply {
    Accept(Option<Value>),
    Reject(String),
    Unreachable,
}

/// An auth backend with a scripted reply that counts its calls
pub struct StubAuthBackend {
    reply: StubAuthReply,
    calls: AtomicUsize,
}

impl StubAuthBackend {
    pub fn new(reply: StubAuthReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthBackend for StubAuthBackend {
    async fn authenticate(&self, _payload: &AuthPayload) -> Result<AuthOutcome, BrokerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubAuthReply::Accept(data) => Ok(AuthOutcome {
                result: AUTHENTICATED_RESULT.to_string(),
                data: data.clone(),
            }),
            StubAuthReply::Reject(reason) => Err(BrokerError::BackendRejection(reason.clone())),
            StubAuthReply::Unreachable => Err(BrokerError::transport("stub-auth", "connection refused")),
        }
    }
}

/// A log backend that records every record it receives.
///
/// Answers with `result` when set, otherwise fails as unreachable.
pub struct RecordingLogBackend {
    result: Option<String>,
    records: Mutex<Vec<(String, String)>>,
}

impl RecordingLogBackend {
    pub fn answering(result: &str) -> Self {
        Self {
            result: Some(result.to_string()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            result: None,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<(String, String)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LogBackend for RecordingLogBackend {
    async fn log(&self, name: &str, data: &str) -> Result<String, BrokerError> {
        self.records
            .lock()
            .unwrap()
            .push((name.to_string(), data.to_string()));
        self.result
            .clone()
            .ok_or_else(|| BrokerError::transport("stub-log", "connection refused"))
    }
}

/// Observer that keeps the names of failed secondary calls
#[derive(Default)]
pub struct RecordingObserver {
    failures: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl SecondaryCallObserver for RecordingObserver {
    fn secondary_call_failed(&self, name: &str, _error: &BrokerError) {
        self.failures.lock().unwrap().push(name.to_string());
    }
}
