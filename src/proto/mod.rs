// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

// Module declaration for generated protobuf code
#[path = "auth.v1.rs"]
pub mod auth_v1;

// Re-export the types for easier access
pub use auth_v1::{AuthRequest, AuthResponse};
