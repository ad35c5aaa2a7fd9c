// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! gRPC adapter for the authentication service.

use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::Instrument;

use super::{describe_error, AUTH_BACKEND};
use crate::config::{AuthBackendConfig, ConnectionStrategy};
use crate::envelope::AuthPayload;
use crate::errors::{BrokerError, ConfigError};
use crate::observability::messages::backend::{
    BackendCallCompleted, BackendCallFailed, BackendCallStarted, ConnectionOpened,
};
use crate::observability::messages::StructuredLog;
use crate::proto::auth_v1::auth_service_client::AuthServiceClient;
use crate::proto::{AuthRequest, AuthResponse};
use crate::traits::{AuthBackend, AuthOutcome, AUTHENTICATED_RESULT};

const AUTHENTICATE_OPERATION: &str = "Authenticate";

/// Relays credentials to `auth.v1.AuthService/Authenticate`.
///
/// The whole call, connection setup included, is bounded by `timeout` on the
/// broker side (no transport-level timeouts race with it). With
/// [`ConnectionStrategy::PerCall`] the channel is dropped when the call returns
/// or is abandoned, so no connection outlives the bound.
pub struct GrpcAuthAdapter {
    endpoint: Endpoint,
    address: String,
    timeout: Duration,
    strategy: ConnectionStrategy,
    shared: OnceCell<Channel>,
}

impl GrpcAuthAdapter {
    pub fn new(
        address: &str,
        timeout: Duration,
        strategy: ConnectionStrategy,
    ) -> Result<Self, ConfigError> {
        let endpoint = Endpoint::from_shared(address.to_string())
            .map_err(|e| ConfigError::InvalidValue {
                field: "auth.endpoint",
                reason: e.to_string(),
            })?;

        Ok(Self {
            endpoint,
            address: address.to_string(),
            timeout,
            strategy,
            shared: OnceCell::new(),
        })
    }

    pub fn from_config(config: &AuthBackendConfig) -> Result<Self, ConfigError> {
        Self::new(config.get_endpoint(), config.timeout(), config.connection)
    }

    async fn channel(&self) -> Result<Channel, BrokerError> {
        match self.strategy {
            ConnectionStrategy::PerCall => {
                let channel = self
                    .endpoint
                    .connect()
                    .await
                    .map_err(|e| BrokerError::transport(AUTH_BACKEND, describe_error(&e)))?;
                ConnectionOpened {
                    backend: AUTH_BACKEND,
                    address: &self.address,
                    shared: false,
                }
                .log();
                Ok(channel)
            }
            // A lazy channel reconnects on its own after a failure.
            ConnectionStrategy::Shared => {
                let channel = self
                    .shared
                    .get_or_init(|| async {
                        ConnectionOpened {
                            backend: AUTH_BACKEND,
                            address: &self.address,
                            shared: true,
                        }
                        .log();
                        self.endpoint.connect_lazy()
                    })
                    .await;
                Ok(channel.clone())
            }
        }
    }

    async fn call(&self, payload: &AuthPayload) -> Result<AuthOutcome, BrokerError> {
        let mut client = AuthServiceClient::new(self.channel().await?);

        let request = AuthRequest {
            email: payload.email.clone(),
            password: payload.password.clone(),
        };

        let response = client
            .authenticate(request)
            .await
            .map_err(|status| map_status(status, self.timeout))?
            .into_inner();

        interpret_response(response)
    }
}

#[async_trait]
impl AuthBackend for GrpcAuthAdapter {
    async fn authenticate(&self, payload: &AuthPayload) -> Result<AuthOutcome, BrokerError> {
        let started = BackendCallStarted {
            backend: AUTH_BACKEND,
            operation: AUTHENTICATE_OPERATION,
            timeout: self.timeout,
        };
        let span = started.span("authenticate");
        started.log();

        let start_time = Instant::now();
        let result = match tokio::time::timeout(self.timeout, self.call(payload))
            .instrument(span)
            .await
        {
            Ok(result) => result,
            Err(_) => Err(BrokerError::TimeoutFailure {
                backend: AUTH_BACKEND,
                timeout: self.timeout,
            }),
        };

        match &result {
            Ok(_) => BackendCallCompleted {
                backend: AUTH_BACKEND,
                operation: AUTHENTICATE_OPERATION,
                duration: start_time.elapsed(),
            }
            .log(),
            Err(error) => BackendCallFailed {
                backend: AUTH_BACKEND,
                operation: AUTHENTICATE_OPERATION,
                error,
            }
            .log(),
        }

        result
    }
}

/// Map a non-OK gRPC status onto the broker's error kinds.
fn map_status(status: Status, timeout: Duration) -> BrokerError {
    let description = if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    };

    match status.code() {
        Code::Unavailable | Code::Cancelled => BrokerError::transport(AUTH_BACKEND, description),
        Code::DeadlineExceeded => BrokerError::TimeoutFailure {
            backend: AUTH_BACKEND,
            timeout,
        },
        _ => BrokerError::BackendRejection(description),
    }
}

/// Only an `Authenticated` result counts as success; anything else the
/// backend answers is its own description of a rejection.
fn interpret_response(response: AuthResponse) -> Result<AuthOutcome, BrokerError> {
    if response.result != AUTHENTICATED_RESULT {
        let reason = if response.result.is_empty() {
            "authentication rejected".to_string()
        } else {
            response.result
        };
        return Err(BrokerError::BackendRejection(reason));
    }

    let data = response
        .data
        .map(|raw| serde_json::from_str::<Value>(&raw).unwrap_or_else(|_| Value::String(raw)));

    Ok(AuthOutcome {
        result: response.result,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_authenticated_response_parses_json_data() {
        let outcome = interpret_response(AuthResponse {
            result: "Authenticated".to_string(),
            data: Some(r#"{"id":1,"email":"a@b.com"}"#.to_string()),
        })
        .unwrap();

        assert_eq!(outcome.result, "Authenticated");
        assert_eq!(outcome.data, Some(json!({"id": 1, "email": "a@b.com"})));
    }

    #[test]
    fn test_non_json_data_kept_as_string() {
        let outcome = interpret_response(AuthResponse {
            result: "Authenticated".to_string(),
            data: Some("user-42".to_string()),
        })
        .unwrap();

        assert_eq!(outcome.data, Some(Value::String("user-42".to_string())));
    }

    #[test]
    fn test_other_result_is_rejection() {
        let err = interpret_response(AuthResponse {
            result: "invalid credentials".to_string(),
            data: None,
        })
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BackendRejection);
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_status_mapping() {
        let timeout = Duration::from_secs(1);

        let unavailable = map_status(Status::unavailable("connection refused"), timeout);
        assert_eq!(unavailable.kind(), ErrorKind::TransportFailure);

        let deadline = map_status(Status::deadline_exceeded(""), timeout);
        assert_eq!(deadline.kind(), ErrorKind::TimeoutFailure);

        let denied = map_status(Status::unauthenticated("invalid credentials"), timeout);
        assert_eq!(denied.kind(), ErrorKind::BackendRejection);
        assert_eq!(denied.to_string(), "invalid credentials");
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let result = GrpcAuthAdapter::new("not a uri", Duration::from_secs(1), ConnectionStrategy::PerCall);
        assert!(matches!(result, Err(ConfigError::InvalidValue { field: "auth.endpoint", .. })));
    }
}
