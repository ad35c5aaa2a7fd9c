// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON-RPC 1.0 wire types spoken by the logging service.
//!
//! One request object per line out, one response object per line back, the
//! framing used by Go's `net/rpc/jsonrpc` codec:
//!
//! ```text
//! -> {"method":"RPCServer.LogInfo","params":[{"Name":"n","Data":"d"}],"id":3}
//! <- {"id":3,"result":"logged ok","error":null}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backends::LOG_BACKEND;
use crate::errors::BrokerError;

/// Longest response line accepted from the logging service
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<RpcPayload>,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: &str, name: &str, data: &str, id: u64) -> Self {
        Self {
            method: method.to_string(),
            params: vec![RpcPayload {
                name: name.to_string(),
                data: data.to_string(),
            }],
            id,
        }
    }
}

/// The name/data record; field names follow the service's exported struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RpcPayload {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: u64,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RpcResponse {
    /// Turn a reply into the result string for request `expected_id`.
    pub fn into_result(self, expected_id: u64) -> Result<String, BrokerError> {
        if self.id != expected_id {
            return Err(BrokerError::transport(
                LOG_BACKEND,
                format!("reply id {} does not match request id {}", self.id, expected_id),
            ));
        }

        match self.error {
            Some(Value::String(message)) => Err(BrokerError::BackendRejection(message)),
            Some(other) => Err(BrokerError::BackendRejection(other.to_string())),
            None => self.result.ok_or_else(|| {
                BrokerError::transport(LOG_BACKEND, "reply carried neither result nor error")
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_request_wire_shape() {
        let request = RpcRequest::new("RPCServer.LogInfo", "n", "d", 3);
        let line = serde_json::to_string(&request).unwrap();
        assert_eq!(
            line,
            r#"{"method":"RPCServer.LogInfo","params":[{"Name":"n","Data":"d"}],"id":3}"#
        );
    }

    #[test]
    fn test_result_reply() {
        let reply: RpcResponse =
            serde_json::from_str(r#"{"id":3,"result":"logged ok","error":null}"#).unwrap();
        assert_eq!(reply.into_result(3).unwrap(), "logged ok");
    }

    #[test]
    fn test_error_reply_is_rejection() {
        let reply: RpcResponse =
            serde_json::from_str(r#"{"id":1,"result":null,"error":"mongo unavailable"}"#).unwrap();
        let err = reply.into_result(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendRejection);
        assert_eq!(err.to_string(), "mongo unavailable");
    }

    #[test]
    fn test_id_mismatch_is_transport_failure() {
        let reply: RpcResponse =
            serde_json::from_str(r#"{"id":9,"result":"ok","error":null}"#).unwrap();
        assert_eq!(reply.into_result(1).unwrap_err().kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn test_empty_reply_is_transport_failure() {
        let reply: RpcResponse = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(reply.into_result(1).unwrap_err().kind(), ErrorKind::TransportFailure);
    }
}
