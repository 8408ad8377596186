//! Execution state machine vocabulary.
//!
//! State transitions:
//! - Initialized -> Executing -> Complete    (normal completion)
//! - Initialized -> Executing -> Interrupted (skip or fail)
//!
//! Complete and Interrupted are absorbing: no transition leaves them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of one execution.
///
/// Serialized as SCREAMING_SNAKE_CASE to match the wire contract:
/// INITIALIZED / EXECUTING / COMPLETE / INTERRUPTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    /// Created, work not yet started.
    Initialized,

    /// Work in progress.
    Executing,

    /// Work ended normally.
    Complete,

    /// Work ended via skip or fail.
    Interrupted,
}

impl ExecutionState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionState::Complete | ExecutionState::Interrupted)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionState::Initialized => "INITIALIZED",
            ExecutionState::Executing => "EXECUTING",
            ExecutionState::Complete => "COMPLETE",
            ExecutionState::Interrupted => "INTERRUPTED",
        };
        f.write_str(name)
    }
}

/// How an execution concluded.
///
/// Success pairs only with Complete; Skipped and Failed pair only with
/// Interrupted. The pairing is enforced by the transition methods on
/// `ExecutionResult`, which are the sole mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Skipped,
    Failed,
}

impl Status {
    /// Does this status describe an interruption (skip or fail)?
    pub fn is_interruption(self) -> bool {
        matches!(self, Status::Skipped | Status::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "SUCCESS",
            Status::Skipped => "SKIPPED",
            Status::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// The derived outcome field.
///
/// Never stored: always recomputed from (state, status) so it cannot drift.
/// Meaningful (Some) only once the state is terminal.
pub fn derive_outcome(state: ExecutionState, status: Status) -> Option<Status> {
    state.is_terminal().then_some(status)
}
