//! Serializable views over the domain model.

pub mod snapshot;
pub mod subject;

pub use snapshot::ResultView;
pub use subject::Subject;
