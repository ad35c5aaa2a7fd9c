// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use action_broker::config::{load_and_validate_config, Config};
use action_broker::observability::init_tracing;
use action_broker::web::{build_dispatcher, BrokerServer};
use anyhow::Context;
use std::env;
use std::sync::Arc;

/// Environment variable naming the config file when no argument is given
const CONFIG_ENV_VAR: &str = "BROKER_CONFIG";

/// Config path from the first argument, then `BROKER_CONFIG`.
fn config_path() -> Option<String> {
    env::args().nth(1).or_else(|| env::var(CONFIG_ENV_VAR).ok())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match config_path() {
        Some(path) => load_and_validate_config(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::default(),
    };

    let dispatcher = build_dispatcher(&config).context("failed to build backend adapters")?;

    BrokerServer::create_server(&config, Arc::new(dispatcher))
        .context("failed to bind HTTP server")?
        .await
        .context("broker server failed")?;

    Ok(())
}
