//! Default-reason lookup seam.
//!
//! Interrupted results must carry a reason. When the caller gives none, the
//! transition asks this collaborator for the text behind the `"unspecified"`
//! key. The full localized catalog lives outside the core; only the seam
//! and its built-in fallback are here.

use std::fmt;

/// Message key for the default interruption reason.
pub const UNSPECIFIED: &str = "unspecified";

/// External text service for default reasons.
pub trait MessageLookup: fmt::Debug + Send + Sync {
    /// Resolve a message key to display text.
    fn resolve(&self, key: &str) -> String;
}

/// Built-in lookup with the fixed fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMessages;

impl MessageLookup for StaticMessages {
    fn resolve(&self, key: &str) -> String {
        match key {
            UNSPECIFIED => "no reason given".to_string(),
            other => other.to_string(),
        }
    }
}
