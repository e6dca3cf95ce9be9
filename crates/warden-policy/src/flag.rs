//! Shared guard flag
//!
//! Provides [`GuardFlag`], the single writable bit shared by every node
//! spawned from one guarded root.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared writability flag
///
/// Cloning produces another handle to the same underlying cell, so a
/// toggle through any handle is observed by all of them. There is no
/// per-node lock state anywhere in the system; nodes hold clones of the
/// root's flag.
///
/// The cell is atomic so handles stay coherent when shared across
/// threads; coordinating concurrent toggles is the caller's problem.
#[derive(Debug, Clone)]
pub struct GuardFlag(Arc<AtomicBool>);

impl GuardFlag {
    /// Create a flag with the given initial writability
    #[inline]
    #[must_use]
    pub fn new(writable: bool) -> Self {
        Self(Arc::new(AtomicBool::new(writable)))
    }

    /// Current writability
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set writability
    #[inline]
    pub fn set_writable(&self, writable: bool) {
        self.0.store(writable, Ordering::Release);
    }

    /// Check whether two handles share the same underlying cell
    #[inline]
    #[must_use]
    pub fn shares_cell(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
