//! Denial errors for rejected mutations
//!
//! One variant per operation category, each carrying a fixed message so
//! callers can surface which kind of mutation was rejected.

use crate::policy::Mutation;

/// Rejected mutation, by operation category
///
/// Raised synchronously at the point of the denied operation and never
/// deferred or batched; the target is always left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DenialError {
    /// Property assignment attempted while locked
    #[error("Object protected, you couldn't set data")]
    WriteDenied,

    /// Property deletion attempted while locked
    #[error("Object protected, you couldn't delete data")]
    DeleteDenied,

    /// Property definition attempted while locked
    #[error("Object protected, you couldn't create data")]
    DefineDenied,
}

impl DenialError {
    /// Denial raised for the given operation category
    #[inline]
    #[must_use]
    pub fn for_mutation(mutation: Mutation) -> Self {
        match mutation {
            Mutation::Write => Self::WriteDenied,
            Mutation::Delete => Self::DeleteDenied,
            Mutation::Define => Self::DefineDenied,
        }
    }
}
