// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for request routing events.
//!
//! This module contains message types for logging events related to:
//! * Action envelope decoding and routing
//! * Dispatcher state transitions
//! * The secondary log call issued after a successful authentication

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// An action envelope was decoded and is about to be routed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use action_broker::observability::messages::dispatch::RequestReceived;
///
/// let msg = RequestReceived { action: "log" };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RequestReceived<'a> {
    pub action: &'a str,
}

impl Display for RequestReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Received '{}' request", self.action)
    }
}

impl StructuredLog for RequestReceived<'_> {
    fn log(&self) {
        tracing::info!(action = self.action, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("dispatch", span_name = name, action = self.action)
    }
}

/// The envelope named an action the broker does not route.
///
/// # Log Level
/// `warn!` - Client error, no backend was contacted
pub struct ActionRejected<'a> {
    pub action: &'a str,
}

impl Display for ActionRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected unknown action '{}'", self.action)
    }
}

impl StructuredLog for ActionRejected<'_> {
    fn log(&self) {
        tracing::warn!(action = self.action, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("action_rejected", span_name = name, action = self.action)
    }
}

/// The dispatcher moved from one state to the next.
///
/// # Log Level
/// `debug!` - Detailed trace of the routing state machine
pub struct DispatchTransition<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl Display for DispatchTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dispatch {} -> {}", self.from, self.to)
    }
}

impl StructuredLog for DispatchTransition<'_> {
    fn log(&self) {
        tracing::debug!(from = self.from, to = self.to, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("dispatch_transition", span_name = name, from = self.from, to = self.to)
    }
}

/// A request produced its response envelope.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use action_broker::observability::messages::dispatch::DispatchCompleted;
/// use std::time::Duration;
///
/// let msg = DispatchCompleted {
///     action: "auth",
///     is_error: false,
///     duration: Duration::from_millis(12),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct DispatchCompleted<'a> {
    pub action: &'a str,
    pub is_error: bool,
    pub duration: Duration,
}

impl Display for DispatchCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.is_error { "error" } else { "success" };
        write!(
            f,
            "'{}' request completed with {} in {:?}",
            self.action, outcome, self.duration
        )
    }
}

impl StructuredLog for DispatchCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            action = self.action,
            is_error = self.is_error,
            duration = ?self.duration,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "dispatch_completed",
            span_name = name,
            action = self.action,
            is_error = self.is_error,
        )
    }
}

/// The log call chained after a successful authentication failed.
///
/// The failure never reaches the HTTP caller; this event is the only trace of it.
///
/// # Log Level
/// `warn!` - Degraded behavior, primary response unaffected
///
/// # Example
/// ```
/// use action_broker::observability::messages::dispatch::SecondaryCallFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
/// let msg = SecondaryCallFailed {
///     name: "authentication",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct SecondaryCallFailed<'a> {
    pub name: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SecondaryCallFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Error logging '{}' event: {}", self.name, self.error)
    }
}

impl StructuredLog for SecondaryCallFailed<'_> {
    fn log(&self) {
        tracing::warn!(record = self.name, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "secondary_call_failed",
            span_name = name,
            record = self.name,
            error = %self.error,
        )
    }
}
