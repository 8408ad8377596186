//! Flattened, serializable view of a result.
//!
//! This is the sole shape assertion layers compare against, so it is total
//! and stable for every legal state: all six keys are always present,
//! absent fields render as null, metadata as a (possibly empty) map, and
//! the cause as its kind tag only. Two results with identical
//! (state, status, reason, metadata, cause-kind) tuples flatten
//! identically; ids never leak into the view.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ExecutionResult, ExecutionState, FaultKind, Metadata, Status};

/// Snapshot of a result's observable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    pub state: ExecutionState,
    pub status: Status,
    pub outcome: Option<Status>,
    pub metadata: Metadata,
    pub reason: Option<String>,
    pub cause: Option<FaultKind>,
}

impl From<&ExecutionResult> for ResultView {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            state: result.state(),
            status: result.status(),
            outcome: result.outcome(),
            metadata: result.metadata().clone(),
            reason: result.reason().map(str::to_owned),
            cause: result.cause().map(|fault| fault.kind()),
        }
    }
}

impl ResultView {
    /// Key/value form for structural comparison.
    ///
    /// Built by hand so it is infallible; enum renderings match the serde
    /// names (`Display` and the wire name are the same strings).
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("state".to_string(), Value::String(self.state.to_string()));
        map.insert("status".to_string(), Value::String(self.status.to_string()));
        map.insert(
            "outcome".to_string(),
            match self.outcome {
                Some(status) => Value::String(status.to_string()),
                None => Value::Null,
            },
        );
        map.insert("metadata".to_string(), Value::Object(self.metadata.into_map()));
        map.insert(
            "reason".to_string(),
            match self.reason {
                Some(reason) => Value::String(reason),
                None => Value::Null,
            },
        );
        map.insert(
            "cause".to_string(),
            match self.cause {
                Some(kind) => Value::String(kind.to_string()),
                None => Value::Null,
            },
        );
        map
    }
}

impl ExecutionResult {
    /// Flatten into the comparison shape.
    pub fn snapshot(&self) -> ResultView {
        ResultView::from(self)
    }
}
