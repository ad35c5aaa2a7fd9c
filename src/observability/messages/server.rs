// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the HTTP ingress lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The HTTP server is binding and about to accept requests.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use action_broker::observability::messages::server::ServerStarting;
///
/// let msg = ServerStarting {
///     address: "0.0.0.0:8080",
///     auth_endpoint: "http://auth-service:50001",
///     log_address: "log-service:5001",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ServerStarting<'a> {
    pub address: &'a str,
    pub auth_endpoint: &'a str,
    pub log_address: &'a str,
}

impl Display for ServerStarting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting broker service on {} (auth={}, log={})",
            self.address, self.auth_endpoint, self.log_address
        )
    }
}

impl StructuredLog for ServerStarting<'_> {
    fn log(&self) {
        tracing::info!(
            address = self.address,
            auth_endpoint = self.auth_endpoint,
            log_address = self.log_address,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("server", span_name = name, address = self.address)
    }
}

/// An inbound body could not be decoded into an action envelope.
///
/// # Log Level
/// `warn!` - Client error
pub struct BodyRejected<'a> {
    pub reason: &'a str,
}

impl Display for BodyRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected request body: {}", self.reason)
    }
}

impl StructuredLog for BodyRejected<'_> {
    fn log(&self) {
        tracing::warn!(reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("body_rejected", span_name = name, reason = self.reason)
    }
}
