// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod broker;
mod config;

pub use broker::{BrokerError, ErrorKind};
pub use config::ConfigError;
