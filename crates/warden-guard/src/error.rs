//! Error types for guarded values
//!
//! Denials pass through transparently so callers observe the literal
//! policy messages; the remaining variants cover the statically-typed
//! surface the dynamic source shape could not express.

use warden_policy::DenialError;

use crate::node::NodeKind;
use crate::path::KeyPath;

/// Errors from operations on guarded values
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Mutation rejected by the policy
    #[error(transparent)]
    Denied(#[from] DenialError),

    /// Object operation against a node of another kind
    #[error("expected an object node, found {0}")]
    NotAnObject(NodeKind),

    /// Array operation against a node of another kind
    #[error("expected an array node, found {0}")]
    NotAnArray(NodeKind),

    /// Path did not resolve to an addressable slot
    #[error("no value at path: {0}")]
    PathNotFound(KeyPath),

    /// Typed conversion to or from a plain value failed
    #[error("typed conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),

    /// Slot storage lock was poisoned by a panicking writer
    #[error("node storage lock poisoned")]
    LockPoisoned,
}

impl GuardError {
    /// The denial carried by this error, if it is one
    #[inline]
    #[must_use]
    pub fn denial(&self) -> Option<DenialError> {
        match self {
            Self::Denied(denial) => Some(*denial),
            _ => None,
        }
    }
}

/// Result type alias for guard operations
pub type GuardResult<T> = Result<T, GuardError>;
