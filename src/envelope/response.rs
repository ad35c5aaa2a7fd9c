// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{BrokerError, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform result shape returned for every request outcome.
///
/// `error=false` means the backend operation succeeded. `data` and `kind` are
/// omitted from the JSON when absent; `kind` is only ever set on errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ResponseEnvelope {
    pub fn new(is_error: bool, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            error: is_error,
            message: message.into(),
            data,
            kind: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }

    pub fn success_with_data(message: impl Into<String>, data: Option<Value>) -> Self {
        Self::new(false, message, data)
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            ..Self::new(true, message, None)
        }
    }
}

impl From<&BrokerError> for ResponseEnvelope {
    fn from(err: &BrokerError) -> Self {
        ResponseEnvelope::failure(err.kind(), err.to_string())
    }
}

impl From<BrokerError> for ResponseEnvelope {
    fn from(err: BrokerError) -> Self {
        ResponseEnvelope::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_omits_optional_fields() {
        let json = serde_json::to_value(ResponseEnvelope::success("logged ok")).unwrap();
        assert_eq!(json, json!({"error": false, "message": "logged ok"}));
    }

    #[test]
    fn test_success_with_data_keeps_payload() {
        let envelope = ResponseEnvelope::success_with_data("Authenticated", Some(json!({"id": 7})));
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(
            json,
            json!({"error": false, "message": "Authenticated", "data": {"id": 7}})
        );
    }

    #[test]
    fn test_error_carries_kind() {
        let err = BrokerError::InvalidAction("bogus".to_string());
        let json = serde_json::to_value(ResponseEnvelope::from(&err)).unwrap();
        assert_eq!(
            json,
            json!({"error": true, "message": "unknown action", "kind": "invalid_action"})
        );
    }
}
