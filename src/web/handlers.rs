// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use actix_web::web::{Data, Json};
use actix_web::HttpResponse;

use super::error::respond;
use crate::dispatcher::ActionDispatcher;
use crate::envelope::{ActionEnvelope, ResponseEnvelope};

/// Message answered by the liveness route
pub const BROKER_GREETING: &str = "hit the broker";

/// Liveness probe
///
/// # Endpoint
/// `POST /`
///
/// # Returns
/// 202 with `{"error":false,"message":"hit the broker"}`
pub async fn broker() -> HttpResponse {
    respond(ResponseEnvelope::success(BROKER_GREETING))
}

/// Action submission endpoint
///
/// # Endpoint
/// `POST /handle`
///
/// # Description
/// Decodes the action envelope, routes it to the matching backend and writes
/// the response envelope back. Exactly one envelope is written per request.
pub async fn handle_submission(
    dispatcher: Data<ActionDispatcher>,
    envelope: Json<ActionEnvelope>,
) -> HttpResponse {
    let response = dispatcher.dispatch_envelope(envelope.into_inner()).await;
    respond(response)
}
