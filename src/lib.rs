// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // backend call adapters
pub mod config;     // YAML config + defaults
pub mod dispatcher; // action routing state machine
pub mod envelope;   // inbound action / outbound response shapes
pub mod errors;     // error handling
pub mod observability;
pub mod proto;      // generated protobufs live here
pub mod traits;     // adapter and observer abstractions
pub mod web;        // HTTP ingress
