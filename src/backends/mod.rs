// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backend call adapters for the broker.
//!
//! Each adapter translates the broker's internal call shape into one backend's
//! wire protocol and back. The two backends are intentionally heterogeneous and
//! are not interchangeable.
//!
//! # Available Backends
//!
//! ## Auth Adapter
//! gRPC client for `auth.v1.AuthService/Authenticate`:
//! - **Input**: email/password, relayed verbatim
//! - **Output**: result string plus an optional JSON payload
//! - **Failures**: unreachable, timed out, or rejected by the service
//!
//! ## Log Adapter
//! Line-delimited JSON-RPC client for `RPCServer.LogInfo`:
//! - **Input**: a name/data record
//! - **Output**: the service's result string, echoed verbatim to the caller
//!
//! ## Stub Backends (Test-Only)
//! Scripted in-memory adapters recording every call, used to test the
//! dispatcher and the HTTP surface without a network.
//!
//! # Architecture
//!
//! ```text
//! Configuration → BackendFactory → Adapter → ActionDispatcher
//! ```
//!
//! Both adapters share the same discipline: a bounded round trip (connection
//! setup included) and a configurable [`ConnectionStrategy`](crate::config::ConnectionStrategy).

pub mod auth;
pub mod factory;
pub mod logger;
#[cfg(test)]
pub mod stub;


pub use auth::GrpcAuthAdapter;
pub use factory::BackendFactory;
pub use logger::JsonRpcLogAdapter;

/// Name the authentication backend is reported under
pub const AUTH_BACKEND: &str = "auth-service";
/// Name the logging backend is reported under
pub const LOG_BACKEND: &str = "log-service";

/// Render an error together with its chain of sources.
///
/// Transport errors often say little at the top level ("transport error"); the
/// useful part sits in the sources.
pub(crate) fn describe_error(error: &dyn std::error::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "transport error")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_describe_error_includes_sources() {
        let error = Outer(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"));
        assert_eq!(describe_error(&error), "transport error: connection refused");
    }
}
