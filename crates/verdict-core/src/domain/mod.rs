//! Domain model (ids, states, results, faults).

pub mod context;
pub mod errors;
pub mod fault;
pub mod ids;
pub mod metadata;
pub mod result;
pub mod state;

pub use context::Context;
pub use errors::TransitionError;
pub use fault::{Chain, Fault, FaultKind, Origin};
pub use ids::{Id, IdMarker, ResultId, RunId};
pub use metadata::Metadata;
pub use result::{ExecutionResult, Halt, Propagation};
pub use state::{ExecutionState, Status, derive_outcome};
