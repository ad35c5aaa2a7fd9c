// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Action routing: one decoded envelope in, exactly one response envelope out.
//!
//! ```text
//! Idle → ActionSelected → BackendInvoked → (SecondaryInvoked) → Responded
//! ```
//!
//! An unrecognized action goes straight from `Idle` to `Responded` without
//! touching any backend. A successful authentication chains a log call
//! (`SecondaryInvoked`) that is awaited before responding but whose outcome
//! never reaches the client; its failures go to the [`SecondaryCallObserver`].

mod state;

pub use state::{DispatchState, DispatchTrace};

use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::envelope::{Action, ActionEnvelope, AuthPayload, LogPayload, ResponseEnvelope};
use crate::errors::BrokerError;
use crate::observability::messages::dispatch::{ActionRejected, DispatchCompleted, RequestReceived};
use crate::observability::messages::StructuredLog;
use crate::traits::{AuthBackend, LogBackend, SecondaryCallObserver, TracingObserver};

/// Record name used for the log call issued after a successful authentication
pub const AUTHENTICATION_LOG_NAME: &str = "authentication";

/// Routes actions to the backend adapters and normalizes their outcomes.
///
/// Holds no per-request state; one instance is shared by every HTTP worker.
pub struct ActionDispatcher {
    auth: Arc<dyn AuthBackend>,
    log: Arc<dyn LogBackend>,
    observer: Arc<dyn SecondaryCallObserver>,
}

impl ActionDispatcher {
    pub fn new(auth: Arc<dyn AuthBackend>, log: Arc<dyn LogBackend>) -> Self {
        Self {
            auth,
            log,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default tracing observer for secondary-call failures.
    pub fn with_observer(mut self, observer: Arc<dyn SecondaryCallObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Route one inbound envelope and produce its response.
    pub async fn dispatch_envelope(&self, envelope: ActionEnvelope) -> ResponseEnvelope {
        let mut trace = DispatchTrace::new();
        self.dispatch_with_trace(envelope, &mut trace).await
    }

    pub(crate) async fn dispatch_with_trace(
        &self,
        envelope: ActionEnvelope,
        trace: &mut DispatchTrace,
    ) -> ResponseEnvelope {
        let action_label = envelope.action.clone();
        let received = RequestReceived {
            action: &action_label,
        };
        let span = received.span("dispatch");
        received.log();

        let start_time = Instant::now();
        let response = self.route(envelope, trace).instrument(span).await;

        DispatchCompleted {
            action: &action_label,
            is_error: response.error,
            duration: start_time.elapsed(),
        }
        .log();

        response
    }

    async fn route(&self, envelope: ActionEnvelope, trace: &mut DispatchTrace) -> ResponseEnvelope {
        let action = match Action::try_from(envelope) {
            Ok(action) => action,
            Err(error) => {
                if let BrokerError::InvalidAction(action) = &error {
                    ActionRejected { action }.log();
                }
                trace.advance(DispatchState::Responded);
                return ResponseEnvelope::from(&error);
            }
        };
        trace.advance(DispatchState::ActionSelected);

        let result = match action {
            Action::Auth(payload) => self.authenticate(payload, trace).await,
            Action::Log(payload) => self.relay_log(payload, trace).await,
        };

        trace.advance(DispatchState::Responded);
        result.unwrap_or_else(|error| ResponseEnvelope::from(&error))
    }

    async fn authenticate(
        &self,
        payload: AuthPayload,
        trace: &mut DispatchTrace,
    ) -> Result<ResponseEnvelope, BrokerError> {
        trace.advance(DispatchState::BackendInvoked);
        let outcome = self.auth.authenticate(&payload).await?;

        trace.advance(DispatchState::SecondaryInvoked);
        let record = format!("{} successfully logged in", payload.email);
        if let Err(error) = self.log.log(AUTHENTICATION_LOG_NAME, &record).await {
            self.observer
                .secondary_call_failed(AUTHENTICATION_LOG_NAME, &error);
        }

        Ok(ResponseEnvelope::success_with_data(outcome.result, outcome.data))
    }

    async fn relay_log(
        &self,
        payload: LogPayload,
        trace: &mut DispatchTrace,
    ) -> Result<ResponseEnvelope, BrokerError> {
        trace.advance(DispatchState::BackendInvoked);
        let result = self.log.log(&payload.name, &payload.data).await?;
        Ok(ResponseEnvelope::success(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{RecordingLogBackend, RecordingObserver, StubAuthBackend, StubAuthReply};
    use crate::errors::ErrorKind;
    use serde_json::json;

    fn envelope(body: serde_json::Value) -> ActionEnvelope {
        serde_json::from_value(body).unwrap()
    }

    fn auth_envelope() -> ActionEnvelope {
        envelope(json!({"action": "auth", "auth": {"email": "a@b.com", "password": "x"}}))
    }

    struct Harness {
        auth: Arc<StubAuthBackend>,
        log: Arc<RecordingLogBackend>,
        observer: Arc<RecordingObserver>,
        dispatcher: ActionDispatcher,
    }

    fn harness(auth_reply: StubAuthReply, log: RecordingLogBackend) -> Harness {
        let auth = Arc::new(StubAuthBackend::new(auth_reply));
        let log = Arc::new(log);
        let observer = Arc::new(RecordingObserver::default());
        let dispatcher = ActionDispatcher::new(auth.clone(), log.clone()).with_observer(observer.clone());
        Harness {
            auth,
            log,
            observer,
            dispatcher,
        }
    }

    #[tokio::test]
    async fn test_unknown_action_makes_no_backend_call() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::answering("ok"));
        let mut trace = DispatchTrace::new();

        let response = h
            .dispatcher
            .dispatch_with_trace(envelope(json!({"action": "bogus"})), &mut trace)
            .await;

        assert!(response.error);
        assert_eq!(response.message, "unknown action");
        assert_eq!(response.kind, Some(ErrorKind::InvalidAction));
        assert_eq!(h.auth.call_count(), 0);
        assert!(h.log.records().is_empty());
        assert_eq!(trace.history(), &[DispatchState::Idle, DispatchState::Responded]);
    }

    #[tokio::test]
    async fn test_successful_auth_logs_exactly_once() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::answering("logged"));
        let mut trace = DispatchTrace::new();

        let response = h.dispatcher.dispatch_with_trace(auth_envelope(), &mut trace).await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": false, "message": "Authenticated"})
        );
        assert_eq!(
            h.log.records(),
            vec![(
                "authentication".to_string(),
                "a@b.com successfully logged in".to_string()
            )]
        );
        assert_eq!(
            trace.history(),
            &[
                DispatchState::Idle,
                DispatchState::ActionSelected,
                DispatchState::BackendInvoked,
                DispatchState::SecondaryInvoked,
                DispatchState::Responded,
            ]
        );
    }

    #[tokio::test]
    async fn test_secondary_failure_does_not_change_response() {
        let h = harness(StubAuthReply::Accept(Some(json!({"id": 1}))), RecordingLogBackend::unreachable());

        let response = h.dispatcher.dispatch_envelope(auth_envelope()).await;

        assert!(!response.error);
        assert_eq!(response.message, "Authenticated");
        assert_eq!(response.data, Some(json!({"id": 1})));
        assert_eq!(response.kind, None);
        assert_eq!(h.log.records().len(), 1);
        assert_eq!(h.observer.failures(), vec!["authentication".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_auth_skips_secondary_call() {
        let h = harness(
            StubAuthReply::Reject("invalid credentials".to_string()),
            RecordingLogBackend::answering("logged"),
        );
        let mut trace = DispatchTrace::new();

        let response = h.dispatcher.dispatch_with_trace(auth_envelope(), &mut trace).await;

        assert!(response.error);
        assert_eq!(response.message, "invalid credentials");
        assert_eq!(response.kind, Some(ErrorKind::BackendRejection));
        assert!(h.log.records().is_empty());
        assert!(!trace.history().contains(&DispatchState::SecondaryInvoked));
        assert_eq!(trace.state(), DispatchState::Responded);
    }

    #[tokio::test]
    async fn test_unreachable_auth_is_transport_failure() {
        let h = harness(StubAuthReply::Unreachable, RecordingLogBackend::answering("logged"));

        let response = h.dispatcher.dispatch_envelope(auth_envelope()).await;

        assert!(response.error);
        assert_eq!(response.kind, Some(ErrorKind::TransportFailure));
        assert!(h.log.records().is_empty());
    }

    #[tokio::test]
    async fn test_log_action_echoes_backend_result() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::answering("logged ok"));

        let response = h
            .dispatcher
            .dispatch_envelope(envelope(json!({"action": "log", "log": {"name": "n", "data": "d"}})))
            .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": false, "message": "logged ok"})
        );
        assert_eq!(h.log.records(), vec![("n".to_string(), "d".to_string())]);
        assert_eq!(h.auth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_log_action_is_not_deduplicated() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::answering("logged ok"));
        let body = json!({"action": "log", "log": {"name": "n", "data": "d"}});

        h.dispatcher.dispatch_envelope(envelope(body.clone())).await;
        h.dispatcher.dispatch_envelope(envelope(body)).await;

        assert_eq!(h.log.records().len(), 2);
    }

    #[tokio::test]
    async fn test_direct_log_failure_is_surfaced() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::unreachable());

        let response = h
            .dispatcher
            .dispatch_envelope(envelope(json!({"action": "log", "log": {"name": "n", "data": "d"}})))
            .await;

        assert!(response.error);
        assert_eq!(response.kind, Some(ErrorKind::TransportFailure));
        assert!(h.observer.failures().is_empty());
    }

    #[tokio::test]
    async fn test_missing_payload_is_decode_error() {
        let h = harness(StubAuthReply::Accept(None), RecordingLogBackend::answering("ok"));

        let response = h.dispatcher.dispatch_envelope(envelope(json!({"action": "auth"}))).await;

        assert!(response.error);
        assert_eq!(response.kind, Some(ErrorKind::DecodeError));
        assert_eq!(h.auth.call_count(), 0);
    }
}
