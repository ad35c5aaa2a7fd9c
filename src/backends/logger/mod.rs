// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Line-delimited JSON-RPC adapter for the logging service.

pub mod jsonrpc;

use async_trait::async_trait;
use futures::{FutureExt, SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::Instrument;

use super::{describe_error, LOG_BACKEND};
use crate::config::{ConnectionStrategy, LogBackendConfig};
use crate::errors::BrokerError;
use crate::observability::messages::backend::{
    BackendCallCompleted, BackendCallFailed, BackendCallStarted, ConnectionOpened,
    StaleConnectionDropped,
};
use crate::observability::messages::StructuredLog;
use crate::traits::LogBackend;
use jsonrpc::{RpcRequest, RpcResponse, MAX_LINE_LENGTH};

type RpcConnection = Framed<TcpStream, LinesCodec>;

/// Relays name/data records to the logging service's JSON-RPC listener.
///
/// Every call is bounded by `timeout`, connection setup included. With
/// [`ConnectionStrategy::Shared`] calls are serialized over one connection that
/// is dropped and re-opened after any transport failure or timeout, or when the
/// peer has closed it while idle.
pub struct JsonRpcLogAdapter {
    address: String,
    method: String,
    timeout: Duration,
    strategy: ConnectionStrategy,
    next_id: AtomicU64,
    shared: Mutex<Option<RpcConnection>>,
}

impl JsonRpcLogAdapter {
    pub fn new(address: &str, method: &str, timeout: Duration, strategy: ConnectionStrategy) -> Self {
        Self {
            address: address.to_string(),
            method: method.to_string(),
            timeout,
            strategy,
            next_id: AtomicU64::new(0),
            shared: Mutex::new(None),
        }
    }

    pub fn from_config(config: &LogBackendConfig) -> Self {
        Self::new(
            config.get_address(),
            config.get_method(),
            config.timeout(),
            config.connection,
        )
    }

    async fn connect(&self, shared: bool) -> Result<RpcConnection, BrokerError> {
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|e| BrokerError::transport(LOG_BACKEND, describe_error(&e)))?;

        ConnectionOpened {
            backend: LOG_BACKEND,
            address: &self.address,
            shared,
        }
        .log();

        Ok(Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)))
    }

    async fn call(&self, name: &str, data: &str) -> Result<String, BrokerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let line = serde_json::to_string(&RpcRequest::new(&self.method, name, data, id))
            .map_err(|e| BrokerError::transport(LOG_BACKEND, e))?;

        match self.strategy {
            ConnectionStrategy::PerCall => {
                let mut connection = self.connect(false).await?;
                exchange(&mut connection, line, id).await
            }
            ConnectionStrategy::Shared => {
                let mut slot = self.shared.lock().await;
                // Taken out while in use; a cancelled call leaves the slot empty.
                let reusable = match slot.take() {
                    Some(mut connection) => {
                        if is_open(&mut connection) {
                            Some(connection)
                        } else {
                            StaleConnectionDropped {
                                backend: LOG_BACKEND,
                                address: &self.address,
                            }
                            .log();
                            None
                        }
                    }
                    None => None,
                };
                let mut connection = match reusable {
                    Some(connection) => connection,
                    None => self.connect(true).await?,
                };

                let result = exchange(&mut connection, line, id).await;
                if !matches!(result, Err(BrokerError::TransportFailure { .. })) {
                    *slot = Some(connection);
                }
                result
            }
        }
    }
}

/// Whether an idle connection can still carry a request.
///
/// An idle connection has nothing to read; anything ready (EOF, an error or an
/// unsolicited line) means it must not be reused.
fn is_open(connection: &mut RpcConnection) -> bool {
    connection.next().now_or_never().is_none()
}

/// Write one request line and read back its response line.
async fn exchange(connection: &mut RpcConnection, line: String, id: u64) -> Result<String, BrokerError> {
    connection
        .send(line)
        .await
        .map_err(|e| BrokerError::transport(LOG_BACKEND, describe_error(&e)))?;

    let reply = connection
        .next()
        .await
        .ok_or_else(|| BrokerError::transport(LOG_BACKEND, "connection closed before reply"))?
        .map_err(|e| BrokerError::transport(LOG_BACKEND, describe_error(&e)))?;

    let response: RpcResponse = serde_json::from_str(&reply)
        .map_err(|e| BrokerError::transport(LOG_BACKEND, format!("malformed reply: {}", e)))?;

    response.into_result(id)
}

#[async_trait]
impl LogBackend for JsonRpcLogAdapter {
    async fn log(&self, name: &str, data: &str) -> Result<String, BrokerError> {
        let started = BackendCallStarted {
            backend: LOG_BACKEND,
            operation: &self.method,
            timeout: self.timeout,
        };
        let span = started.span("log");
        started.log();

        let start_time = Instant::now();
        let result = match tokio::time::timeout(self.timeout, self.call(name, data))
            .instrument(span)
            .await
        {
            Ok(result) => result,
            Err(_) => Err(BrokerError::TimeoutFailure {
                backend: LOG_BACKEND,
                timeout: self.timeout,
            }),
        };

        match &result {
            Ok(_) => BackendCallCompleted {
                backend: LOG_BACKEND,
                operation: &self.method,
                duration: start_time.elapsed(),
            }
            .log(),
            Err(error) => BackendCallFailed {
                backend: LOG_BACKEND,
                operation: &self.method,
                error,
            }
            .log(),
        }

        result
    }
}
