//! Instance-scoped transition journal.
//!
//! The harness that wants a record of transitions owns a `Journal`, records
//! into it, and calls `reset` at teardown. No process-global registries:
//! two harnesses hold two journals and never see each other's events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ExecutionResult, ExecutionState, ResultId, RunId, Status};

/// Which transition produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Begin,
    Complete,
    Skip,
    Fail,
}

/// One recorded transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub result_id: ResultId,
    pub transition: Transition,

    /// State and status as they stood after the transition.
    pub state: ExecutionState,
    pub status: Status,

    pub at: DateTime<Utc>,
}

/// Owned, correlation-tagged event log.
#[derive(Debug, Clone)]
pub struct Journal {
    run_id: RunId,
    events: Vec<TransitionEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            events: Vec::new(),
        }
    }

    /// Correlation id of the current run.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Append an event for a transition just applied to `result`.
    pub fn record(&mut self, result: &ExecutionResult, transition: Transition) {
        self.events.push(TransitionEvent {
            result_id: result.id(),
            transition,
            state: result.state(),
            status: result.status(),
            at: Utc::now(),
        });
    }

    pub fn events(&self) -> &[TransitionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Explicit teardown: drop recorded events and rotate the correlation
    /// id, so a reused journal starts a distinguishable run.
    pub fn reset(&mut self) {
        self.run_id = RunId::new();
        self.events.clear();
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}
