use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::AuthPayload;
use crate::errors::BrokerError;

/// Result string the authentication backend returns for valid credentials
pub const AUTHENTICATED_RESULT: &str = "Authenticated";

/// What the authentication backend answered for accepted credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub result: String,
    pub data: Option<Value>,
}

/// Adapter to the authentication service.
///
/// Implementations own their transport, enforce their own timeout and map every
/// backend-specific failure into a [`BrokerError`]. `Ok` is only returned for an
/// accepted authentication.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn authenticate(&self, payload: &AuthPayload) -> Result<AuthOutcome, BrokerError>;
}

/// Adapter to the logging service: a name/data pair in, a result string out.
#[async_trait]
pub trait LogBackend: Send + Sync {
    async fn log(&self, name: &str, data: &str) -> Result<String, BrokerError>;
}
