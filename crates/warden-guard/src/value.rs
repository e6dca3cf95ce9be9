//! Guarded value slots
//!
//! Provides [`GuardedValue`], the tagged variant stored in every slot of
//! a guarded tree, and the recursive wrapping routine that brings
//! composite payloads under the guard.

use indexmap::IndexMap;
use serde_json::Value;
use warden_policy::MutationPolicy;

use crate::error::GuardResult;
use crate::node::GuardedNode;

/// A stored slot within a guarded tree
///
/// Composites written through the guarded surface become
/// [`GuardedNode`]s; primitives stay raw. A composite can also sit in a
/// `Raw` slot when it was deliberately stored without interception: the
/// define path and the pass-through strategy both do this.
#[derive(Debug, Clone)]
pub enum GuardedValue {
    /// Unwrapped payload, not individually guarded
    Raw(Value),

    /// A composite under the guard
    Node(GuardedNode),
}

impl GuardedValue {
    /// Wrap a payload under `policy`
    ///
    /// Composites become nodes, and every nested entry is re-inserted
    /// through this same routine, so arbitrarily deep nesting is
    /// individually wrapped rather than only the top level. Primitives
    /// (including null) are stored as-is.
    #[must_use]
    pub fn wrap(policy: &MutationPolicy, payload: Value) -> Self {
        match payload {
            Value::Object(entries) => {
                let slots: IndexMap<String, Self> = entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::wrap(policy, value)))
                    .collect();
                Self::Node(GuardedNode::from_map(policy.clone(), slots))
            }
            Value::Array(items) => {
                let slots: Vec<Self> = items
                    .into_iter()
                    .map(|value| Self::wrap(policy, value))
                    .collect();
                Self::Node(GuardedNode::from_list(policy.clone(), slots))
            }
            primitive => Self::Raw(primitive),
        }
    }

    /// The guarded node, if this slot holds one
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<&GuardedNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Raw(_) => None,
        }
    }

    /// The raw payload, if this slot holds one
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Whether this slot holds a guarded node
    #[inline]
    #[must_use]
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Materialize the current contents as a plain value
    ///
    /// # Errors
    /// Propagates [`GuardError::LockPoisoned`](crate::GuardError) from
    /// nested node storage.
    pub fn snapshot(&self) -> GuardResult<Value> {
        match self {
            Self::Raw(value) => Ok(value.clone()),
            Self::Node(node) => node.snapshot(),
        }
    }
}
