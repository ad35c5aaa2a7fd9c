// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] so the same fields end up on both the event and, when
//! needed, a span wrapping the work.
//!
//! # Organization
//!
//! * `dispatch` - Action routing and the secondary log call
//! * `backend` - Backend adapter calls and connection handling
//! * `server` - HTTP ingress lifecycle
//!
//! # Usage Pattern
//!
//! ```rust
//! use action_broker::observability::messages::dispatch::RequestReceived;
//! use action_broker::observability::messages::StructuredLog;
//!
//! let msg = RequestReceived { action: "auth" };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod backend;
pub mod dispatch;
pub mod server;

/// Emit a message as a structured `tracing` event or open a span carrying its fields.
pub trait StructuredLog {
    /// Emit the message at its designated level with its fields attached.
    fn log(&self);

    /// Build a span carrying the message fields; `name` distinguishes call sites.
    fn span(&self, name: &str) -> Span;
}
