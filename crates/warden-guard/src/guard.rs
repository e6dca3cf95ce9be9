//! Guard root handle
//!
//! Provides [`Guard`], the public construct bundling the wrapped data
//! with its lock controls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use warden_policy::GuardFlag;

use crate::error::GuardResult;
use crate::strategy::{Intercepting, WrapStrategy};
use crate::value::GuardedValue;

/// Write-protected wrapper around a plain data value
///
/// Construction eagerly wraps every nested composite under one shared
/// flag, then forces the flag to locked: every guard starts locked.
/// `lock` and `unlock` flip that single flag, so a toggle is visible to
/// every node handle of the tree at once, including handles obtained
/// earlier and composites attached later.
///
/// The controls and the data slot are methods and private fields; unlike
/// the dynamic hosts this construct comes from, nothing at runtime needs
/// to stop callers from reassigning them.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use warden_guard::Guard;
///
/// let guard = Guard::new(json!({ "num": 1 }));
/// let root = guard.data().as_node().unwrap();
///
/// // starts locked
/// assert!(root.set("num", json!(2)).is_err());
///
/// guard.unlock();
/// root.set("num", json!(2)).unwrap();
/// assert_eq!(guard.snapshot().unwrap(), json!({ "num": 2 }));
/// ```
#[derive(Debug)]
pub struct Guard {
    data: GuardedValue,
    flag: GuardFlag,
}

impl Guard {
    /// Wrap `source` with the default intercepting strategy
    #[must_use]
    pub fn new(source: Value) -> Self {
        Self::with_strategy(source, &Intercepting)
    }

    /// Wrap `source` with an explicit strategy
    ///
    /// The flag starts writable for the eager copy-in, then is forced to
    /// locked before the handle is returned.
    #[must_use]
    pub fn with_strategy(source: Value, strategy: &dyn WrapStrategy) -> Self {
        let flag = GuardFlag::new(true);
        let data = strategy.wrap(&flag, source);
        flag.set_writable(false);
        tracing::trace!(strategy = strategy.name(), "guard constructed locked");
        Self { data, flag }
    }

    /// Construct from any serializable value
    ///
    /// # Errors
    /// Returns an error if `source` cannot be represented as a plain
    /// value.
    pub fn from_typed<T: Serialize>(source: &T) -> GuardResult<Self> {
        let value = serde_json::to_value(source)?;
        Ok(Self::new(value))
    }

    /// The guarded data
    #[inline]
    #[must_use]
    pub fn data(&self) -> &GuardedValue {
        &self.data
    }

    /// Forbid mutation. Unconditional and idempotent.
    pub fn lock(&self) {
        self.flag.set_writable(false);
        tracing::trace!("guard locked");
    }

    /// Permit mutation. Unconditional and idempotent.
    pub fn unlock(&self) {
        self.flag.set_writable(true);
        tracing::trace!("guard unlocked");
    }

    /// Whether mutation is currently forbidden
    ///
    /// Pass-through guards report the root flag, which their nodes do
    /// not consult.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.flag.is_writable()
    }

    /// Materialize the current state as a plain value
    ///
    /// # Errors
    /// Propagates poisoned node storage.
    pub fn snapshot(&self) -> GuardResult<Value> {
        self.data.snapshot()
    }

    /// Materialize the current state into any deserializable type
    ///
    /// # Errors
    /// Returns an error if the state does not match `T`, or node storage
    /// is poisoned.
    pub fn to_typed<T: DeserializeOwned>(&self) -> GuardResult<T> {
        Ok(serde_json::from_value(self.snapshot()?)?)
    }
}

impl Default for Guard {
    /// Guard over an empty object, locked
    fn default() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}
