// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::BrokerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Action literal routed to the authentication backend
pub const AUTH_ACTION: &str = "auth";
/// Action literal routed to the logging backend
pub const LOG_ACTION: &str = "log";

/// Inbound body as it arrives on the wire.
///
/// Payloads stay raw JSON until [`Action`] conversion: only the payload named
/// by `action` is ever decoded, so a malformed sibling is ignored.
///
/// # Example
/// ```json
/// {"action": "auth", "auth": {"email": "a@b.com", "password": "x"}}
/// ```
#[derive(Debug, Deserialize)]
pub struct ActionEnvelope {
    pub action: String,
    #[serde(default)]
    pub auth: Option<Value>,
    #[serde(default)]
    pub log: Option<Value>,
}

/// Credentials relayed verbatim to the authentication backend.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    pub password: String,
}

// Never print the password, not even at trace level.
impl fmt::Debug for AuthPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPayload")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A named log record relayed verbatim to the logging backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPayload {
    pub name: String,
    pub data: String,
}

/// A decoded request: exactly one backend operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthPayload),
    Log(LogPayload),
}

impl Action {
    /// The wire literal for this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Auth(_) => AUTH_ACTION,
            Action::Log(_) => LOG_ACTION,
        }
    }
}

/// A recognized action with a missing or malformed payload is a `DecodeError`;
/// an unrecognized action is `InvalidAction` whatever payloads are present.
impl TryFrom<ActionEnvelope> for Action {
    type Error = BrokerError;

    fn try_from(envelope: ActionEnvelope) -> Result<Self, Self::Error> {
        match envelope.action.as_str() {
            AUTH_ACTION => decode_payload(AUTH_ACTION, envelope.auth).map(Action::Auth),
            LOG_ACTION => decode_payload(LOG_ACTION, envelope.log).map(Action::Log),
            _ => Err(BrokerError::InvalidAction(envelope.action)),
        }
    }
}

fn decode_payload<T: DeserializeOwned>(field: &str, raw: Option<Value>) -> Result<T, BrokerError> {
    let raw = raw.ok_or_else(|| BrokerError::DecodeError(format!("missing '{}' payload", field)))?;
    serde_json::from_value(raw)
        .map_err(|e| BrokerError::DecodeError(format!("invalid '{}' payload: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn decode(body: &[u8]) -> Result<Action, BrokerError> {
        let envelope: ActionEnvelope = serde_json::from_slice(body)?;
        Action::try_from(envelope)
    }

    #[test]
    fn test_decode_auth_action() {
        let body = br#"{"action":"auth","auth":{"email":"a@b.com","password":"x"}}"#;

        let action = decode(body).unwrap();
        assert_eq!(
            action,
            Action::Auth(AuthPayload {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
        );
        assert_eq!(action.name(), "auth");
    }

    #[test]
    fn test_decode_log_action_ignores_sibling_payload() {
        let body = br#"{"action":"log","auth":{"email":"e","password":"p"},"log":{"name":"n","data":"d"}}"#;

        let action = decode(body).unwrap();
        assert_eq!(
            action,
            Action::Log(LogPayload {
                name: "n".to_string(),
                data: "d".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_action_is_invalid_action() {
        let err = decode(br#"{"action":"bogus"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAction);
        assert_eq!(err.to_string(), "unknown action");
    }

    #[test]
    fn test_unknown_action_wins_over_present_payload() {
        let err = decode(br#"{"action":"AUTH","auth":{"email":"e","password":"p"}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAction);
    }

    #[test]
    fn test_unknown_action_ignores_malformed_payload() {
        let err = decode(br#"{"action":"bogus","log":"x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAction);
        assert_eq!(err.to_string(), "unknown action");
    }

    #[test]
    fn test_malformed_sibling_payload_is_ignored() {
        let action = decode(br#"{"action":"log","auth":42,"log":{"name":"n","data":"d"}}"#).unwrap();
        assert_eq!(action.name(), "log");
    }

    #[test]
    fn test_malformed_selected_payload_is_decode_error() {
        let err = decode(br#"{"action":"auth","auth":{"email":"e"}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert!(err.to_string().contains("'auth'"));
    }

    #[test]
    fn test_missing_payload_is_decode_error() {
        let err = decode(br#"{"action":"log"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert!(err.to_string().contains("'log'"));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = decode(b"{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_missing_action_field_is_decode_error() {
        let err = decode(br#"{"log":{"name":"n","data":"d"}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_debug_redacts_password() {
        let payload = AuthPayload {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", payload);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("hunter2"));
    }
}
