// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::dispatch::DispatchTransition;
use crate::observability::messages::StructuredLog;

/// Where a single request is in its routing lifecycle.
///
/// `Responded` is terminal and reached exactly once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    ActionSelected,
    BackendInvoked,
    SecondaryInvoked,
    Responded,
}

impl DispatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchState::Idle => "idle",
            DispatchState::ActionSelected => "action_selected",
            DispatchState::BackendInvoked => "backend_invoked",
            DispatchState::SecondaryInvoked => "secondary_invoked",
            DispatchState::Responded => "responded",
        }
    }
}

/// Per-request record of the state machine; emits a debug event on every move.
#[derive(Debug)]
pub struct DispatchTrace {
    state: DispatchState,
    history: Vec<DispatchState>,
}

impl DispatchTrace {
    pub fn new() -> Self {
        Self {
            state: DispatchState::Idle,
            history: vec![DispatchState::Idle],
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn history(&self) -> &[DispatchState] {
        &self.history
    }

    pub fn advance(&mut self, to: DispatchState) {
        DispatchTransition {
            from: self.state.as_str(),
            to: to.as_str(),
        }
        .log();
        self.state = to;
        self.history.push(to);
    }
}

impl Default for DispatchTrace {
    fn default() -> Self {
        Self::new()
    }
}
