//! Execution result: the record of one unit of work's lifecycle.
//!
//! Design:
//! - Single source of truth for (state, status, reason, metadata, cause).
//! - All state transitions happen here; fields are never mutated directly,
//!   so only the four legal terminal shapes are reachable.
//! - Single-writer: one logical execution context drives a result at a
//!   time, synchronously. Sharing one across concurrent executors needs
//!   external synchronization; cancellation is a caller invoking `skip` or
//!   `fail`, never an asynchronous interrupt.

use std::sync::Arc;
use std::time::Instant;

use super::context::Context;
use super::errors::TransitionError;
use super::fault::{Fault, FaultKind, Origin};
use super::ids::ResultId;
use super::metadata::Metadata;
use super::state::{ExecutionState, Status, derive_outcome};
use crate::messages::{MessageLookup, StaticMessages, UNSPECIFIED};

/// Whether an interrupting transition hands its fault back for the caller
/// to unwind with, or records it for inspection only.
///
/// The transition itself is identical either way; only the disposition of
/// the constructed fault differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Hand the fault back; the caller stops and propagates it.
    Propagate,

    /// Store the fault as `cause` only. Stub-style construction.
    Record,
}

/// What an interrupting transition asks the caller to do next.
#[must_use]
#[derive(Debug, Clone)]
pub enum Propagation {
    /// Unwind with this fault. `Fault` is `std::error::Error`, so
    /// `return Err(fault.into())` composes with ordinary plumbing.
    Halted(Arc<Fault>),

    /// The fault was recorded as `cause`; continue normally.
    Recorded,
}

impl Propagation {
    /// The fault to unwind with, if the transition halted.
    pub fn into_fault(self) -> Option<Arc<Fault>> {
        match self {
            Propagation::Halted(fault) => Some(fault),
            Propagation::Recorded => None,
        }
    }
}

/// Record of one execution's lifecycle and terminal outcome.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    id: ResultId,
    context: Context,
    state: ExecutionState,
    status: Status,
    metadata: Metadata,
    reason: Option<String>,
    cause: Option<Arc<Fault>>,
    messages: Arc<dyn MessageLookup>,
    created_at: Instant,
    updated_at: Instant,
}

impl ExecutionResult {
    /// Pipeline path: a fresh record in `Initialized`.
    pub fn new(context: Context) -> Self {
        Self::with_messages(context, Arc::new(StaticMessages))
    }

    /// As [`new`](Self::new), with a caller-supplied message collaborator
    /// for default reasons.
    pub fn with_messages(context: Context, messages: Arc<dyn MessageLookup>) -> Self {
        let now = Instant::now();
        Self {
            id: ResultId::new(),
            context,
            state: ExecutionState::Initialized,
            status: Status::Success,
            metadata: Metadata::new(),
            reason: None,
            cause: None,
            messages,
            created_at: now,
            updated_at: now,
        }
    }

    /// Synthetic construction: a record born in `Executing`.
    ///
    /// Testing affordance for stub layers that need a terminal result
    /// without driving the pipeline path. The pipeline path (`new` +
    /// `begin_execution`) cannot skip states; only this constructor can,
    /// and callers reaching for it are saying so by name.
    pub fn synthetic(context: Context) -> Self {
        let mut result = Self::new(context);
        result.state = ExecutionState::Executing;
        result
    }

    pub fn id(&self) -> ResultId {
        self.id
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Raw status field. Meaningful only once terminal; prefer
    /// [`outcome`](Self::outcome) unless you know the state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Derived view of `status`: `Some` exactly when the state is terminal.
    pub fn outcome(&self) -> Option<Status> {
        derive_outcome(self.state, self.status)
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The fault explaining this result's interruption, if interrupted.
    pub fn cause(&self) -> Option<&Arc<Fault>> {
        self.cause.as_ref()
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_executing(&self) -> bool {
        self.state == ExecutionState::Executing
    }

    pub fn is_success(&self) -> bool {
        self.outcome() == Some(Status::Success)
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome() == Some(Status::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        self.outcome() == Some(Status::Failed)
    }

    /// Initialized -> Executing. Work begins.
    pub fn begin_execution(&mut self) -> Result<(), TransitionError> {
        if self.state != ExecutionState::Initialized {
            return Err(TransitionError::InvalidTransition {
                from: self.state,
                op: "begin_execution",
            });
        }
        self.state = ExecutionState::Executing;
        self.touch();
        Ok(())
    }

    /// Executing -> Complete, status Success. Not idempotent: a second
    /// terminal attempt is caller misuse.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        if self.state != ExecutionState::Executing {
            return Err(TransitionError::InvalidTransition {
                from: self.state,
                op: "complete",
            });
        }
        self.state = ExecutionState::Complete;
        self.status = Status::Success;
        self.touch();
        Ok(())
    }

    /// Executing -> Interrupted, status Skipped.
    ///
    /// `extra` merges into metadata (later values win per key). A missing
    /// `reason` resolves through the message collaborator. The skip fault
    /// is constructed with the transition and stored as `cause` either way;
    /// `halt` only controls whether it is also handed back for unwinding.
    /// `upstream` threads an inner result's fault into the chain.
    pub fn skip(
        &mut self,
        reason: Option<String>,
        extra: Metadata,
        upstream: Option<Arc<Fault>>,
        halt: Halt,
    ) -> Result<Propagation, TransitionError> {
        self.interrupt(FaultKind::Skip, "skip", reason, extra, upstream, halt)
    }

    /// Executing -> Interrupted, status Failed. Mirrors [`skip`](Self::skip).
    pub fn fail(
        &mut self,
        reason: Option<String>,
        extra: Metadata,
        upstream: Option<Arc<Fault>>,
        halt: Halt,
    ) -> Result<Propagation, TransitionError> {
        self.interrupt(FaultKind::Fail, "fail", reason, extra, upstream, halt)
    }

    /// Merge extra metadata before the terminal transition seals the record.
    pub fn merge_metadata(&mut self, extra: Metadata) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(TransitionError::MetadataSealed { state: self.state });
        }
        self.metadata.merge(extra);
        self.touch();
        Ok(())
    }

    fn interrupt(
        &mut self,
        kind: FaultKind,
        op: &'static str,
        reason: Option<String>,
        extra: Metadata,
        upstream: Option<Arc<Fault>>,
        halt: Halt,
    ) -> Result<Propagation, TransitionError> {
        if self.state != ExecutionState::Executing {
            return Err(TransitionError::InvalidTransition {
                from: self.state,
                op,
            });
        }
        self.state = ExecutionState::Interrupted;
        self.status = kind.status();
        self.metadata.merge(extra);

        let reason = reason.unwrap_or_else(|| self.messages.resolve(UNSPECIFIED));
        self.reason = Some(reason.clone());

        // Origin is frozen before the fault is stored, so the fault can
        // never reach itself through the record.
        let origin = Origin::new(self.id, self.status, reason, self.metadata.clone(), upstream);
        let fault = Arc::new(kind.wrap(origin));
        self.cause = Some(Arc::clone(&fault));
        self.touch();

        Ok(match halt {
            Halt::Propagate => Propagation::Halted(fault),
            Halt::Record => Propagation::Recorded,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn meta(entries: &[(&str, serde_json::Value)]) -> Metadata {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn new_result_starts_initialized_with_no_outcome() {
        let result = ExecutionResult::new(Context::new());

        assert_eq!(result.state(), ExecutionState::Initialized);
        assert_eq!(result.outcome(), None);
        assert_eq!(result.reason(), None);
        assert!(result.cause().is_none());
        assert!(result.metadata().is_empty());
        assert!(!result.is_terminal());
    }

    #[test]
    fn begin_then_complete_yields_success() {
        let mut result = ExecutionResult::new(Context::new());

        result.begin_execution().unwrap();
        assert!(result.is_executing());

        result.complete().unwrap();
        assert_eq!(result.state(), ExecutionState::Complete);
        assert_eq!(result.status(), Status::Success);
        assert_eq!(result.outcome(), Some(Status::Success));
        assert!(result.is_success());
        assert!(result.cause().is_none());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn begin_is_only_legal_from_initialized() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();

        let err = result.begin_execution().unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: ExecutionState::Executing,
                op: "begin_execution",
            }
        );
    }

    #[test]
    fn complete_before_begin_is_misuse() {
        let mut result = ExecutionResult::new(Context::new());

        let err = result.complete().unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: ExecutionState::Initialized,
                op: "complete",
            }
        );
    }

    #[rstest]
    #[case::complete_again("complete")]
    #[case::skip_after_complete("skip")]
    #[case::fail_after_complete("fail")]
    fn second_terminal_transition_is_misuse(#[case] op: &str) {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();
        result.complete().unwrap();

        let err = match op {
            "complete" => result.complete().unwrap_err(),
            "skip" => result
                .skip(None, Metadata::new(), None, Halt::Record)
                .map(|_| ())
                .unwrap_err(),
            _ => result
                .fail(None, Metadata::new(), None, Halt::Record)
                .map(|_| ())
                .unwrap_err(),
        };

        assert!(matches!(
            err,
            TransitionError::InvalidTransition {
                from: ExecutionState::Complete,
                ..
            }
        ));
        // Terminal shape is untouched by the rejected attempt.
        assert_eq!(result.outcome(), Some(Status::Success));
    }

    #[test]
    fn skip_without_reason_uses_the_default_and_wraps_this_result() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();

        let propagation = result.skip(None, Metadata::new(), None, Halt::Record).unwrap();
        assert!(propagation.into_fault().is_none());

        assert_eq!(result.state(), ExecutionState::Interrupted);
        assert_eq!(result.outcome(), Some(Status::Skipped));
        assert_eq!(result.reason(), Some("no reason given"));

        let cause = result.cause().expect("cause is set with the transition");
        assert!(cause.is_skip());
        assert_eq!(cause.origin().result_id(), result.id());
        assert_eq!(cause.origin().reason(), "no reason given");
    }

    #[test]
    fn fail_records_reason_metadata_and_a_fail_fault() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();

        let propagation = result
            .fail(Some("X".to_string()), meta(&[("a", json!(1))]), None, Halt::Record)
            .unwrap();
        assert!(propagation.into_fault().is_none());

        assert_eq!(result.outcome(), Some(Status::Failed));
        assert!(result.is_failed());
        assert_eq!(result.reason(), Some("X"));
        assert_eq!(result.metadata().get("a"), Some(&json!(1)));

        let cause = result.cause().expect("cause is set with the transition");
        assert!(cause.is_fail());
        assert_eq!(cause.origin().result_id(), result.id());
        assert_eq!(cause.origin().metadata(), result.metadata());
    }

    #[test]
    fn halting_hands_back_the_stored_fault() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();

        let fault = result
            .fail(Some("boom".to_string()), Metadata::new(), None, Halt::Propagate)
            .unwrap()
            .into_fault()
            .expect("halting interruption hands the fault back");

        let cause = result.cause().expect("also stored as cause");
        assert!(Arc::ptr_eq(&fault, cause));
        assert_eq!(fault.to_string(), "failed: boom");
    }

    #[test]
    fn interruption_merges_extra_metadata_last_write_wins() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();
        result.merge_metadata(meta(&[("a", json!(1))])).unwrap();

        let _ = result
            .skip(
                Some("r".to_string()),
                meta(&[("a", json!(2)), ("b", json!(3))]),
                None,
                Halt::Record,
            )
            .unwrap();

        assert_eq!(result.metadata(), &meta(&[("a", json!(2)), ("b", json!(3))]));
    }

    #[test]
    fn metadata_is_sealed_after_the_terminal_transition() {
        let mut result = ExecutionResult::new(Context::new());
        result.begin_execution().unwrap();
        result.complete().unwrap();

        let err = result.merge_metadata(meta(&[("late", json!(true))])).unwrap_err();
        assert_eq!(
            err,
            TransitionError::MetadataSealed {
                state: ExecutionState::Complete,
            }
        );
        assert!(result.metadata().is_empty());
    }

    #[test]
    fn skip_requires_executing() {
        let mut result = ExecutionResult::new(Context::new());

        let err = result
            .skip(None, Metadata::new(), None, Halt::Record)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: ExecutionState::Initialized,
                op: "skip",
            }
        );
    }

    #[test]
    fn synthetic_results_start_executing() {
        let mut result = ExecutionResult::synthetic(Context::new());
        assert!(result.is_executing());

        // The stub path: interrupt without unwinding anything.
        let _ = result
            .skip(Some("stubbed".to_string()), Metadata::new(), None, Halt::Record)
            .unwrap();
        assert!(result.is_skipped());
        assert!(result.cause().is_some());
    }

    #[test]
    fn upstream_fault_forms_a_two_link_chain() {
        let mut inner = ExecutionResult::new(Context::new());
        inner.begin_execution().unwrap();
        let inner_fault = inner
            .fail(Some("root cause".to_string()), Metadata::new(), None, Halt::Propagate)
            .unwrap()
            .into_fault()
            .unwrap();

        let mut outer = ExecutionResult::new(Context::new());
        outer.begin_execution().unwrap();
        let _ = outer
            .skip(
                Some("prerequisite failed".to_string()),
                Metadata::new(),
                Some(Arc::clone(&inner_fault)),
                Halt::Record,
            )
            .unwrap();

        let cause = outer.cause().expect("outer is interrupted");
        assert_eq!(cause.origin().result_id(), outer.id());

        let links: Vec<(FaultKind, ResultId)> = cause
            .chain()
            .map(|fault| (fault.kind(), fault.origin().result_id()))
            .collect();
        assert_eq!(
            links,
            vec![(FaultKind::Skip, outer.id()), (FaultKind::Fail, inner.id())]
        );
    }

    #[test]
    fn custom_message_lookup_supplies_the_default_reason() {
        #[derive(Debug)]
        struct Catalog;

        impl MessageLookup for Catalog {
            fn resolve(&self, key: &str) -> String {
                format!("[{key}]")
            }
        }

        let mut result = ExecutionResult::with_messages(Context::new(), Arc::new(Catalog));
        result.begin_execution().unwrap();
        let _ = result.skip(None, Metadata::new(), None, Halt::Record).unwrap();

        assert_eq!(result.reason(), Some("[unspecified]"));
    }

    #[test]
    fn context_is_held_opaquely() {
        let context: Context = [("user_id".to_string(), json!(7))].into_iter().collect();
        let mut result = ExecutionResult::new(context.clone());

        result.begin_execution().unwrap();
        result.complete().unwrap();

        // Transitions never touch the context.
        assert_eq!(result.context(), &context);
    }
}
