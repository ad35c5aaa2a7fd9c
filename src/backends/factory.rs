use std::sync::Arc;

use super::{GrpcAuthAdapter, JsonRpcLogAdapter};
use crate::config::Config;
use crate::errors::ConfigError;
use crate::traits::{AuthBackend, LogBackend};

/// Factory for creating the backend adapters from configuration
pub struct BackendFactory;

impl BackendFactory {
    pub fn auth_from_config(config: &Config) -> Result<Arc<dyn AuthBackend>, ConfigError> {
        Ok(Arc::new(GrpcAuthAdapter::from_config(&config.auth)?))
    }

    pub fn log_from_config(config: &Config) -> Arc<dyn LogBackend> {
        Arc::new(JsonRpcLogAdapter::from_config(&config.log))
    }
}
