//! Wrap strategies
//!
//! How a source value is brought under a guard is a strategy selected
//! once, at construction, and injected into the root constructor rather
//! than branched on inline. Hosts with interception use
//! [`Intercepting`]; hosts without substitute [`Passthrough`] so the
//! rest of the system degrades gracefully instead of failing to load.

use serde_json::Value;
use warden_policy::{GuardFlag, MutationPolicy};

use crate::value::GuardedValue;

/// How a source value is wrapped at construction
pub trait WrapStrategy {
    /// Wrap `source` for a root whose shared flag is `flag`
    fn wrap(&self, flag: &GuardFlag, source: Value) -> GuardedValue;

    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;
}

/// The real interception layer
///
/// Recursive wrap sharing the root's flag: every composite at every
/// depth becomes a guarded node answering to the same lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intercepting;

impl WrapStrategy for Intercepting {
    fn wrap(&self, flag: &GuardFlag, source: Value) -> GuardedValue {
        GuardedValue::wrap(&MutationPolicy::new(flag.clone()), source)
    }

    fn name(&self) -> &'static str {
        "intercepting"
    }
}

/// Identity pass-through for hosts without interception
///
/// Structure is preserved, but nodes are wired to a detached flag that
/// stays writable: every mutation succeeds and the root's `lock` and
/// `unlock` have no effect. Degraded mode, no protection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl WrapStrategy for Passthrough {
    fn wrap(&self, _flag: &GuardFlag, source: Value) -> GuardedValue {
        GuardedValue::wrap(&MutationPolicy::new(GuardFlag::new(true)), source)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
