// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors produced while decoding, dispatching and relaying a single request.
//!
//! Every variant ends up in a response envelope with `error=true`; none of them
//! is fatal to the process.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Message returned for an action literal the broker does not recognize.
pub const UNKNOWN_ACTION_MESSAGE: &str = "unknown action";

/// Machine-readable classification of a [`BrokerError`].
///
/// Serialized into the `kind` field of the response envelope so callers (and
/// tests) can tell failures apart without parsing `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidAction,
    DecodeError,
    TransportFailure,
    TimeoutFailure,
    BackendRejection,
}

impl ErrorKind {
    /// Client-side errors are reported with 400; backend failures keep the
    /// broker's "accepted" status and rely on the body's `error` flag.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::InvalidAction | ErrorKind::DecodeError)
    }
}

/// Failure of a broker request.
#[derive(Error, Debug)]
pub enum BrokerError {
    /// The `action` field is not one of the recognized literals.
    #[error("{}", UNKNOWN_ACTION_MESSAGE)]
    InvalidAction(String),

    /// The inbound body could not be decoded into an action envelope.
    #[error("{0}")]
    DecodeError(String),

    /// The backend could not be reached or the connection broke mid-call.
    #[error("{backend} unreachable: {reason}")]
    TransportFailure {
        backend: &'static str,
        reason: String,
    },

    /// The backend did not answer within the configured bound.
    #[error("{backend} did not respond within {timeout:?}")]
    TimeoutFailure {
        backend: &'static str,
        timeout: Duration,
    },

    /// The backend answered and explicitly reported a failure.
    #[error("{0}")]
    BackendRejection(String),
}

impl BrokerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrokerError::InvalidAction(_) => ErrorKind::InvalidAction,
            BrokerError::DecodeError(_) => ErrorKind::DecodeError,
            BrokerError::TransportFailure { .. } => ErrorKind::TransportFailure,
            BrokerError::TimeoutFailure { .. } => ErrorKind::TimeoutFailure,
            BrokerError::BackendRejection(_) => ErrorKind::BackendRejection,
        }
    }

    pub fn transport(backend: &'static str, reason: impl ToString) -> Self {
        BrokerError::TransportFailure {
            backend,
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for BrokerError {
    fn from(e: serde_json::Error) -> Self {
        BrokerError::DecodeError(e.to_string())
    }
}
