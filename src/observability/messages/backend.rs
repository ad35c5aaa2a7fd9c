// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend adapter calls.
//!
//! This module contains message types for logging events related to:
//! * Connection setup per call or on the shared slot, and stale slot eviction
//! * Call lifecycle (start, completion, failure)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A backend call is about to be issued.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct BackendCallStarted<'a> {
    pub backend: &'a str,
    pub operation: &'a str,
    pub timeout: Duration,
}

impl Display for BackendCallStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Calling {} on {} (timeout={:?})",
            self.operation, self.backend, self.timeout
        )
    }
}

impl StructuredLog for BackendCallStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            backend = self.backend,
            operation = self.operation,
            timeout = ?self.timeout,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "backend_call",
            span_name = name,
            backend = self.backend,
            operation = self.operation,
        )
    }
}

/// A backend call returned a usable answer.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use action_broker::observability::messages::backend::BackendCallCompleted;
/// use std::time::Duration;
///
/// let msg = BackendCallCompleted {
///     backend: "auth-service",
///     operation: "Authenticate",
///     duration: Duration::from_millis(8),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BackendCallCompleted<'a> {
    pub backend: &'a str,
    pub operation: &'a str,
    pub duration: Duration,
}

impl Display for BackendCallCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} on {} completed in {:?}",
            self.operation, self.backend, self.duration
        )
    }
}

impl StructuredLog for BackendCallCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            operation = self.operation,
            duration = ?self.duration,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "backend_call_completed",
            span_name = name,
            backend = self.backend,
            operation = self.operation,
        )
    }
}

/// A backend call failed (transport, timeout or explicit rejection).
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct BackendCallFailed<'a> {
    pub backend: &'a str,
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for BackendCallFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} on {} failed: {}",
            self.operation, self.backend, self.error
        )
    }
}

impl StructuredLog for BackendCallFailed<'_> {
    fn log(&self) {
        tracing::error!(
            backend = self.backend,
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "backend_call_failed",
            span_name = name,
            backend = self.backend,
            operation = self.operation,
            error = %self.error,
        )
    }
}

/// A transport connection to a backend was opened.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct ConnectionOpened<'a> {
    pub backend: &'a str,
    pub address: &'a str,
    pub shared: bool,
}

impl Display for ConnectionOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.shared { "shared" } else { "per-call" };
        write!(
            f,
            "Opened {} connection to {} at {}",
            mode, self.backend, self.address
        )
    }
}

impl StructuredLog for ConnectionOpened<'_> {
    fn log(&self) {
        tracing::debug!(
            backend = self.backend,
            address = self.address,
            shared = self.shared,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "connection_opened",
            span_name = name,
            backend = self.backend,
            address = self.address,
        )
    }
}

/// A shared connection was found closed by the peer and dropped before reuse.
///
/// # Log Level
/// `debug!` - Expected after backend restarts or idle disconnects
pub struct StaleConnectionDropped<'a> {
    pub backend: &'a str,
    pub address: &'a str,
}

impl Display for StaleConnectionDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropped stale shared connection to {} at {}",
            self.backend, self.address
        )
    }
}

impl StructuredLog for StaleConnectionDropped<'_> {
    fn log(&self) {
        tracing::debug!(backend = self.backend, address = self.address, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stale_connection_dropped",
            span_name = name,
            backend = self.backend,
            address = self.address,
        )
    }
}
