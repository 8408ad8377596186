//! verdict-core
//!
//! Outcome-tracking core for a command execution framework: the record of
//! how one unit of work concluded, and the fault chain explaining why a
//! caller stopped.
//!
//! # Modules
//! - **domain**: the model (ids, state vocabulary, `ExecutionResult`,
//!   `Fault`, metadata, caller context, misuse errors)
//! - **view**: the flattened serialization contract and the
//!   comparison-subject boundary consumed by assertion layers
//! - **journal**: instance-scoped transition log with explicit reset
//! - **messages**: the default-reason lookup seam

pub mod domain;
pub mod journal;
pub mod messages;
pub mod view;
