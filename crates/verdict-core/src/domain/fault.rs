//! Fault: why an execution was interrupted.
//!
//! A fault is constructed atomically with the interrupting transition and
//! never independently of a result. It is an inert value object: no
//! mutation methods, only accessors and chain traversal.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ids::ResultId;
use super::metadata::Metadata;
use super::state::Status;

/// Kind tag for serialized views and reporting.
///
/// Code-level dispatch should match on the `Fault` variants directly; this
/// tag exists so the flattened view can render the kind without the rest of
/// the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultKind {
    Skip,
    Fail,
}

impl FaultKind {
    /// The status an interruption of this kind seals.
    pub fn status(self) -> Status {
        match self {
            FaultKind::Skip => Status::Skipped,
            FaultKind::Fail => Status::Failed,
        }
    }

    pub(crate) fn wrap(self, origin: Origin) -> Fault {
        match self {
            FaultKind::Skip => Fault::Skip(origin),
            FaultKind::Fail => Fault::Fail(origin),
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::Skip => "SKIP",
            FaultKind::Fail => "FAIL",
        };
        f.write_str(name)
    }
}

/// Frozen view of the result whose interruption produced a fault.
///
/// A snapshot rather than a live reference: the producing result owns the
/// fault, so a back-pointer would form a cycle. The snapshot is captured at
/// the interrupting transition, before the fault is stored, and is read-only
/// from then on. Identity with the producing result is by `ResultId`.
#[derive(Debug, Clone)]
pub struct Origin {
    result_id: ResultId,
    status: Status,
    reason: String,
    metadata: Metadata,
    upstream: Option<Arc<Fault>>,
}

impl Origin {
    pub(crate) fn new(
        result_id: ResultId,
        status: Status,
        reason: String,
        metadata: Metadata,
        upstream: Option<Arc<Fault>>,
    ) -> Self {
        Self {
            result_id,
            status,
            reason,
            metadata,
            upstream,
        }
    }

    /// Id of the result this fault originated from.
    pub fn result_id(&self) -> ResultId {
        self.result_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The inner fault this interruption surfaced, if any. Chain link.
    pub fn upstream(&self) -> Option<&Arc<Fault>> {
        self.upstream.as_ref()
    }
}

/// An interruption, tagged by variant.
///
/// The kind is the type itself, so "is this specifically a failure-cause?"
/// is a plain variant check.
#[derive(Debug, Clone)]
pub enum Fault {
    Skip(Origin),
    Fail(Origin),
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Skip(_) => FaultKind::Skip,
            Fault::Fail(_) => FaultKind::Fail,
        }
    }

    /// The originating result's frozen view. Never absent.
    pub fn origin(&self) -> &Origin {
        match self {
            Fault::Skip(origin) | Fault::Fail(origin) => origin,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Fault::Skip(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Fault::Fail(_))
    }

    /// Walk the fault list from this fault (outermost) to the innermost
    /// upstream fault. Acyclic by construction: each origin was frozen
    /// before the fault wrapping it existed.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Skip(origin) => write!(f, "skipped: {}", origin.reason),
            Fault::Fail(origin) => write!(f, "failed: {}", origin.reason),
        }
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.origin()
            .upstream
            .as_deref()
            .map(|fault| fault as &(dyn StdError + 'static))
    }
}

/// Iterator over a fault chain, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Fault>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Fault;

    fn next(&mut self) -> Option<Self::Item> {
        let fault = self.next?;
        self.next = fault.origin().upstream.as_deref();
        Some(fault)
    }
}
