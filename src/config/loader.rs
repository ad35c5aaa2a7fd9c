// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_AUTH_ENDPOINT, DEFAULT_BACKEND_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_LOG_ADDRESS,
    DEFAULT_LOG_METHOD, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT,
};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the broker.
///
/// Every section and field is optional; an empty file (or no file at all)
/// yields a broker listening on `0.0.0.0:8080` that talks to the
/// `auth-service` and `log-service` hosts with a one second bound per call.
///
/// # Example
/// ```yaml
/// server:
///   port: 8080
///   max_body_bytes: 1048576
/// auth:
///   endpoint: "http://auth-service:50001"
///   timeout_ms: 1000
///   connection: per_call
/// log:
///   address: "log-service:5001"
///   method: "RPCServer.LogInfo"
///   timeout_ms: 1000
///   connection: shared
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthBackendConfig,
    #[serde(default)]
    pub log: LogBackendConfig,
}

/// How an adapter obtains its transport connection.
///
/// * `PerCall` - open a fresh connection for every call and close it afterwards
/// * `Shared` - establish one connection lazily and reuse it across calls,
///   re-establishing it after a transport failure
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStrategy {
    #[default]
    PerCall,
    Shared,
}

/// HTTP ingress options.
#[derive(Debug, Deserialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Number of actix workers; defaults to the number of CPU cores
    pub workers: Option<usize>,
    pub max_body_bytes: Option<usize>,
}

impl ServerConfig {
    pub fn get_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn get_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn get_max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.get_host(), self.get_port())
    }
}

/// Authentication backend (gRPC) options.
#[derive(Debug, Deserialize, Default)]
pub struct AuthBackendConfig {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub connection: ConnectionStrategy,
}

impl AuthBackendConfig {
    pub fn get_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_AUTH_ENDPOINT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_BACKEND_TIMEOUT_MS))
    }
}

/// Logging backend (JSON-RPC over TCP) options.
#[derive(Debug, Deserialize, Default)]
pub struct LogBackendConfig {
    pub address: Option<String>,
    pub method: Option<String>,
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub connection: ConnectionStrategy,
}

impl LogBackendConfig {
    pub fn get_address(&self) -> &str {
        self.address.as_deref().unwrap_or(DEFAULT_LOG_ADDRESS)
    }

    pub fn get_method(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_LOG_METHOD)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_BACKEND_TIMEOUT_MS))
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Check that the configuration describes a broker that can actually run.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.server.get_port() == 0 {
        return Err(ConfigError::InvalidValue {
            field: "server.port",
            reason: "port must be non-zero".to_string(),
        });
    }
    if cfg.server.get_max_body_bytes() == 0 {
        return Err(ConfigError::InvalidValue {
            field: "server.max_body_bytes",
            reason: "limit must be non-zero".to_string(),
        });
    }
    if matches!(cfg.server.workers, Some(0)) {
        return Err(ConfigError::InvalidValue {
            field: "server.workers",
            reason: "at least one worker is required".to_string(),
        });
    }

    let endpoint = cfg.auth.get_endpoint();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            field: "auth.endpoint",
            reason: format!("'{}' must start with http:// or https://", endpoint),
        });
    }
    if cfg.auth.timeout().is_zero() {
        return Err(ConfigError::InvalidValue {
            field: "auth.timeout_ms",
            reason: "timeout must be non-zero".to_string(),
        });
    }

    if cfg.log.get_address().trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "log.address",
            reason: "address must not be empty".to_string(),
        });
    }
    if cfg.log.get_method().trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "log.method",
            reason: "method must not be empty".to_string(),
        });
    }
    if cfg.log.timeout().is_zero() {
        return Err(ConfigError::InvalidValue {
            field: "log.timeout_ms",
            reason: "timeout must be non-zero".to_string(),
        });
    }

    Ok(())
}

/// Load and validate a config from a YAML file
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}
