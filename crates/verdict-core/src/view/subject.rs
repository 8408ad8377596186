//! Comparison-subject boundary.
//!
//! Assertion layers accept a small closed set of shapes: a raw JSON
//! mapping, a caller context, or a result. Each resolves to its map form
//! exactly once, here, instead of through scattered type checks at every
//! comparison site.

use serde_json::{Map, Value};

use super::snapshot::ResultView;
use crate::domain::{Context, ExecutionResult};

/// The accepted comparison shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// A raw JSON mapping.
    Map(Map<String, Value>),

    /// A caller context wrapper.
    Context(Context),

    /// A result, carried as its flattened view.
    Result(ResultView),
}

impl Subject {
    /// Normalize to the key/value form used for structural comparison.
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            Subject::Map(map) => map,
            Subject::Context(context) => context.into_map(),
            Subject::Result(view) => view.into_map(),
        }
    }
}

impl From<Map<String, Value>> for Subject {
    fn from(map: Map<String, Value>) -> Self {
        Subject::Map(map)
    }
}

impl From<Context> for Subject {
    fn from(context: Context) -> Self {
        Subject::Context(context)
    }
}

impl From<ResultView> for Subject {
    fn from(view: ResultView) -> Self {
        Subject::Result(view)
    }
}

impl From<&ExecutionResult> for Subject {
    fn from(result: &ExecutionResult) -> Self {
        Subject::Result(result.snapshot())
    }
}
