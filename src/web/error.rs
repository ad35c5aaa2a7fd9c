// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use actix_web::error::JsonPayloadError;

use crate::envelope::ResponseEnvelope;
use crate::errors::{BrokerError, ErrorKind};
use crate::observability::messages::server::BodyRejected;
use crate::observability::messages::StructuredLog;

/// Status for an outbound envelope.
///
/// Success and backend failures answer 202 Accepted and carry the real signal
/// in the body's `error` flag; only client errors answer 400.
pub fn status_for(kind: Option<ErrorKind>) -> StatusCode {
    match kind {
        Some(kind) if kind.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::ACCEPTED,
    }
}

/// Write an envelope with the status its kind calls for.
pub fn respond(envelope: ResponseEnvelope) -> HttpResponse {
    HttpResponse::build(status_for(envelope.kind)).json(envelope)
}

impl ResponseError for BrokerError {
    fn status_code(&self) -> StatusCode {
        status_for(Some(self.kind()))
    }

    fn error_response(&self) -> HttpResponse {
        respond(ResponseEnvelope::from(self))
    }
}

/// Turns body extraction failures (malformed JSON, oversized body) into a
/// decode-error envelope instead of actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    BodyRejected { reason: &reason }.log();
    BrokerError::DecodeError(reason).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(status_for(Some(ErrorKind::InvalidAction)), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(Some(ErrorKind::DecodeError)), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_success_and_backend_failures_are_accepted() {
        assert_eq!(status_for(None), StatusCode::ACCEPTED);
        assert_eq!(status_for(Some(ErrorKind::TransportFailure)), StatusCode::ACCEPTED);
        assert_eq!(status_for(Some(ErrorKind::TimeoutFailure)), StatusCode::ACCEPTED);
        assert_eq!(status_for(Some(ErrorKind::BackendRejection)), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_response_error_uses_envelope_status() {
        let err = BrokerError::TimeoutFailure {
            backend: "auth-service",
            timeout: Duration::from_secs(1),
        };
        assert_eq!(err.status_code(), StatusCode::ACCEPTED);
        assert_eq!(err.error_response().status(), StatusCode::ACCEPTED);
    }
}
