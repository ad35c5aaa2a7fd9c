// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HTTP ingress for the broker.
//!
//! # Routes
//! - POST `/`: liveness probe
//! - POST `/handle`: action submission

pub mod error;
mod handlers;

pub use handlers::BROKER_GREETING;

use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use std::sync::Arc;

use crate::backends::BackendFactory;
use crate::config::Config;
use crate::dispatcher::ActionDispatcher;
use crate::errors::ConfigError;
use crate::observability::messages::server::ServerStarting;
use crate::observability::messages::StructuredLog;

/// Register the broker routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::post().to(handlers::broker))
        .route("/handle", web::post().to(handlers::handle_submission));
}

/// Body decoding rules: size limit, any content type, decode-error envelopes.
pub fn json_config(max_body_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_body_bytes)
        .content_type_required(false)
        .error_handler(error::json_error_handler)
}

/// Everything one app instance needs: shared dispatcher, body rules and routes.
pub fn configure_app(
    dispatcher: Data<ActionDispatcher>,
    max_body_bytes: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(dispatcher).app_data(json_config(max_body_bytes));
        configure_routes(cfg);
    }
}

/// Build the dispatcher with the configured backend adapters.
pub fn build_dispatcher(config: &Config) -> Result<ActionDispatcher, ConfigError> {
    let auth = BackendFactory::auth_from_config(config)?;
    let log = BackendFactory::log_from_config(config);
    Ok(ActionDispatcher::new(auth, log))
}

/// Handles creation of the broker's HTTP server
pub struct BrokerServer;

impl BrokerServer {
    /// Bind the HTTP server; the returned [`Server`] runs until awaited to completion.
    ///
    /// actix stops it gracefully on SIGINT/SIGTERM.
    pub fn create_server(config: &Config, dispatcher: Arc<ActionDispatcher>) -> std::io::Result<Server> {
        let address = config.server.bind_address();
        let max_body_bytes = config.server.get_max_body_bytes();
        let dispatcher = Data::from(dispatcher);

        ServerStarting {
            address: &address,
            auth_endpoint: config.auth.get_endpoint(),
            log_address: config.log.get_address(),
        }
        .log();

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .configure(configure_app(dispatcher.clone(), max_body_bytes))
        });

        if let Some(workers) = config.server.workers {
            server = server.workers(workers);
        }

        Ok(server.bind(&address)?.run())
    }
}
