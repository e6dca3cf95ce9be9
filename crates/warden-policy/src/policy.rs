//! Mutation policy
//!
//! Provides [`MutationPolicy`], the allow/deny rule applied to every
//! property-level mutation against a guarded composite.

use std::fmt::{self, Display, Formatter};

use crate::error::DenialError;
use crate::flag::GuardFlag;

/// Property-level mutation categories
///
/// Array operations are not special-cased: appends, prepends and indexed
/// assignment are writes, tail removal is a delete. Reads have no
/// category because they are never mediated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Assign a value to a slot; composite payloads are recursively
    /// wrapped before being stored
    Write,

    /// Remove a slot
    Delete,

    /// Define a slot directly, without recursive wrapping
    Define,
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Write => "set",
            Self::Delete => "delete",
            Self::Define => "create",
        };
        write!(f, "{name}")
    }
}

/// Policy deciding whether a mutation may proceed
///
/// Holds a handle to the shared [`GuardFlag`]; cloning shares the flag,
/// so every policy derived from one root agrees on writability at any
/// instant. The decision is the same at every depth of a guarded tree.
#[derive(Debug, Clone)]
pub struct MutationPolicy {
    flag: GuardFlag,
}

impl MutationPolicy {
    /// Create a policy over the given flag
    #[inline]
    #[must_use]
    pub fn new(flag: GuardFlag) -> Self {
        Self { flag }
    }

    /// The shared flag
    #[inline]
    #[must_use]
    pub fn flag(&self) -> &GuardFlag {
        &self.flag
    }

    /// Current writability
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.flag.is_writable()
    }

    /// Authorize a mutation against the current flag
    ///
    /// # Errors
    /// Returns the denial for `mutation`'s category while the flag is
    /// not writable.
    #[inline]
    pub fn authorize(&self, mutation: Mutation) -> Result<(), DenialError> {
        if self.flag.is_writable() {
            Ok(())
        } else {
            Err(DenialError::for_mutation(mutation))
        }
    }
}
