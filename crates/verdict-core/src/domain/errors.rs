//! Caller-misuse errors.
//!
//! These mark bugs in the calling code (illegal transition ordering,
//! mutating a sealed record), not domain outcomes. Skip and fail
//! interruptions are carried by `Fault`, never by this type.

use thiserror::Error;

use super::state::ExecutionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("invalid transition: {op} is not legal from {from}")]
    InvalidTransition {
        from: ExecutionState,
        op: &'static str,
    },

    #[error("metadata is sealed once a result is {state}")]
    MetadataSealed { state: ExecutionState },
}
