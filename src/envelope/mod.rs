// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Inbound action envelopes and the uniform outbound response envelope.

mod action;
mod response;

pub use action::{Action, ActionEnvelope, AuthPayload, LogPayload, AUTH_ACTION, LOG_ACTION};
pub use response::ResponseEnvelope;
