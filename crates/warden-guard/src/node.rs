//! Guarded nodes
//!
//! Provides [`GuardedNode`], the interception layer over one composite
//! value. Every mutation authorizes against the shared policy before it
//! touches the slots; a denial leaves the node unchanged. Operations are
//! atomic at single-slot granularity.

use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde_json::Value;
use warden_policy::{Mutation, MutationPolicy};

use crate::error::{GuardError, GuardResult};
use crate::path::KeyPath;
use crate::value::GuardedValue;

/// Composite kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Keyed slots, insertion-ordered
    Object,

    /// Positional slots
    Array,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// Slot storage for one composite
#[derive(Debug)]
enum Slots {
    Map(IndexMap<String, GuardedValue>),
    List(Vec<GuardedValue>),
}

/// Interception layer over a single composite value
///
/// Cloning produces another handle to the same slots and the same shared
/// flag: a `lock`/`unlock` through the root is visible to every handle,
/// including handles obtained before the toggle.
///
/// Reads are never mediated. Mutations authorize first; composite
/// payloads written through [`set`](Self::set) and the array writes are
/// recursively wrapped under the same flag before being stored, so
/// protection stays graph-wide as the tree grows.
#[derive(Debug, Clone)]
pub struct GuardedNode {
    kind: NodeKind,
    slots: Arc<RwLock<Slots>>,
    policy: MutationPolicy,
}

impl GuardedNode {
    pub(crate) fn from_map(policy: MutationPolicy, slots: IndexMap<String, GuardedValue>) -> Self {
        Self {
            kind: NodeKind::Object,
            slots: Arc::new(RwLock::new(Slots::Map(slots))),
            policy,
        }
    }

    pub(crate) fn from_list(policy: MutationPolicy, slots: Vec<GuardedValue>) -> Self {
        Self {
            kind: NodeKind::Array,
            slots: Arc::new(RwLock::new(Slots::List(slots))),
            policy,
        }
    }

    fn read_slots(&self) -> GuardResult<RwLockReadGuard<'_, Slots>> {
        self.slots.read().map_err(|_| GuardError::LockPoisoned)
    }

    fn write_slots(&self) -> GuardResult<RwLockWriteGuard<'_, Slots>> {
        self.slots.write().map_err(|_| GuardError::LockPoisoned)
    }

    fn authorize(&self, mutation: Mutation) -> GuardResult<()> {
        self.policy.authorize(mutation).map_err(|denial| {
            tracing::debug!(%mutation, kind = %self.kind, "mutation denied while locked");
            GuardError::from(denial)
        })
    }

    /// Kind of this node, fixed at construction
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        match self.slots.read() {
            Ok(slots) => match &*slots {
                Slots::Map(map) => map.len(),
                Slots::List(list) => list.len(),
            },
            Err(_) => 0,
        }
    }

    /// Whether the node has no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- reads (never mediated) ----

    /// Read the slot at `key`
    ///
    /// Returns a clone of the stored value: a node handle for guarded
    /// composites, the raw payload otherwise. `None` when the key is
    /// absent or this is not an object node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<GuardedValue> {
        let slots = self.slots.read().ok()?;
        match &*slots {
            Slots::Map(map) => map.get(key).cloned(),
            Slots::List(_) => None,
        }
    }

    /// Read the slot at `index`
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<GuardedValue> {
        let slots = self.slots.read().ok()?;
        match &*slots {
            Slots::List(list) => list.get(index).cloned(),
            Slots::Map(_) => None,
        }
    }

    /// Whether `key` names a slot on this node
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        match self.slots.read() {
            Ok(slots) => match &*slots {
                Slots::Map(map) => map.contains_key(key),
                Slots::List(_) => false,
            },
            Err(_) => false,
        }
    }

    /// Slot keys, in storage order
    ///
    /// Array nodes report their indices as strings.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match self.slots.read() {
            Ok(slots) => match &*slots {
                Slots::Map(map) => map.keys().cloned().collect(),
                Slots::List(list) => (0..list.len()).map(|i| i.to_string()).collect(),
            },
            Err(_) => Vec::new(),
        }
    }

    // ---- object surface ----

    /// Assign `payload` to `key`
    ///
    /// A composite payload is recursively wrapped under the shared flag
    /// before being stored; a primitive is stored as-is.
    ///
    /// # Errors
    /// `WriteDenied` while locked (slot unchanged); `NotAnObject` on an
    /// array node.
    pub fn set(&self, key: impl Into<String>, payload: Value) -> GuardResult<()> {
        self.authorize(Mutation::Write)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::Map(map) => {
                map.insert(key.into(), GuardedValue::wrap(&self.policy, payload));
                Ok(())
            }
            Slots::List(_) => Err(GuardError::NotAnObject(self.kind)),
        }
    }

    /// Remove the slot at `key`, returning it
    ///
    /// Removing an absent key succeeds and returns `None`.
    ///
    /// # Errors
    /// `DeleteDenied` while locked; `NotAnObject` on an array node.
    pub fn remove(&self, key: &str) -> GuardResult<Option<GuardedValue>> {
        self.authorize(Mutation::Delete)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::Map(map) => Ok(map.shift_remove(key)),
            Slots::List(_) => Err(GuardError::NotAnObject(self.kind)),
        }
    }

    /// Define the slot at `key`, storing `payload` unwrapped
    ///
    /// Unlike [`set`](Self::set) there is no recursive wrapping: a
    /// composite attached here is not individually guarded and reads
    /// back as a raw slot. This narrower path is kept deliberately.
    ///
    /// # Errors
    /// `DefineDenied` while locked; `NotAnObject` on an array node.
    pub fn define(&self, key: impl Into<String>, payload: Value) -> GuardResult<()> {
        self.authorize(Mutation::Define)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::Map(map) => {
                map.insert(key.into(), GuardedValue::Raw(payload));
                Ok(())
            }
            Slots::List(_) => Err(GuardError::NotAnObject(self.kind)),
        }
    }

    // ---- array surface ----

    /// Append `payload`
    ///
    /// # Errors
    /// `WriteDenied` while locked; `NotAnArray` on an object node.
    pub fn push(&self, payload: Value) -> GuardResult<()> {
        self.authorize(Mutation::Write)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => {
                list.push(GuardedValue::wrap(&self.policy, payload));
                Ok(())
            }
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    /// Remove and return the last element
    ///
    /// Denies as a delete: the tail slot is discarded.
    ///
    /// # Errors
    /// `DeleteDenied` while locked; `NotAnArray` on an object node.
    pub fn pop(&self) -> GuardResult<Option<GuardedValue>> {
        self.authorize(Mutation::Delete)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => Ok(list.pop()),
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    /// Remove and return the first element
    ///
    /// Denies as a write: the surviving elements are rewritten downward.
    ///
    /// # Errors
    /// `WriteDenied` while locked; `NotAnArray` on an object node.
    pub fn shift(&self) -> GuardResult<Option<GuardedValue>> {
        self.authorize(Mutation::Write)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => {
                if list.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(list.remove(0)))
                }
            }
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    /// Insert `payload` at the front
    ///
    /// # Errors
    /// `WriteDenied` while locked; `NotAnArray` on an object node.
    pub fn unshift(&self, payload: Value) -> GuardResult<()> {
        self.authorize(Mutation::Write)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => {
                list.insert(0, GuardedValue::wrap(&self.policy, payload));
                Ok(())
            }
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    /// Assign `payload` to `index`
    ///
    /// Assignment past the end pads the gap with nulls, matching sparse
    /// assignment in dynamic hosts.
    ///
    /// # Errors
    /// `WriteDenied` while locked; `NotAnArray` on an object node.
    pub fn set_index(&self, index: usize, payload: Value) -> GuardResult<()> {
        self.authorize(Mutation::Write)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => {
                let wrapped = GuardedValue::wrap(&self.policy, payload);
                if index < list.len() {
                    list[index] = wrapped;
                } else {
                    list.resize(index, GuardedValue::Raw(Value::Null));
                    list.push(wrapped);
                }
                Ok(())
            }
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    /// Remove and return the element at `index`
    ///
    /// Removing past the end succeeds and returns `None`.
    ///
    /// # Errors
    /// `DeleteDenied` while locked; `NotAnArray` on an object node.
    pub fn remove_index(&self, index: usize) -> GuardResult<Option<GuardedValue>> {
        self.authorize(Mutation::Delete)?;
        let mut slots = self.write_slots()?;
        match &mut *slots {
            Slots::List(list) => {
                if index < list.len() {
                    Ok(Some(list.remove(index)))
                } else {
                    Ok(None)
                }
            }
            Slots::Map(_) => Err(GuardError::NotAnArray(self.kind)),
        }
    }

    // ---- path surface ----

    /// Resolve the value at `path` relative to this node
    ///
    /// An empty path resolves to this node. Paths do not descend into
    /// raw slots, including composites attached through
    /// [`define`](Self::define).
    #[must_use]
    pub fn at(&self, path: &KeyPath) -> Option<GuardedValue> {
        let mut current = GuardedValue::Node(self.clone());
        for segment in path.iter() {
            let node = current.as_node()?.clone();
            current = node.get_segment(segment)?;
        }
        Some(current)
    }

    /// Assign `payload` at `path`; every parent must already exist
    ///
    /// # Errors
    /// The terminal write's denial or kind mismatch; `PathNotFound` when
    /// the path is empty or a parent is missing or unguarded.
    pub fn set_at(&self, path: &KeyPath, payload: Value) -> GuardResult<()> {
        let (parent, leaf) = self.resolve_parent(path)?;
        match parent.kind() {
            NodeKind::Object => parent.set(leaf, payload),
            NodeKind::Array => {
                let index = Self::parse_index(leaf, path)?;
                parent.set_index(index, payload)
            }
        }
    }

    /// Remove the slot at `path`, returning it
    ///
    /// # Errors
    /// The terminal delete's denial or kind mismatch; `PathNotFound`
    /// when the path is empty or a parent is missing or unguarded.
    pub fn remove_at(&self, path: &KeyPath) -> GuardResult<Option<GuardedValue>> {
        let (parent, leaf) = self.resolve_parent(path)?;
        match parent.kind() {
            NodeKind::Object => parent.remove(leaf),
            NodeKind::Array => {
                let index = Self::parse_index(leaf, path)?;
                parent.remove_index(index)
            }
        }
    }

    fn resolve_parent<'p>(&self, path: &'p KeyPath) -> GuardResult<(Self, &'p str)> {
        let leaf = path
            .last()
            .ok_or_else(|| GuardError::PathNotFound(path.clone()))?;
        let mut node = self.clone();
        for segment in path.parent_segments() {
            let next = node
                .get_segment(segment)
                .ok_or_else(|| GuardError::PathNotFound(path.clone()))?;
            node = match next {
                GuardedValue::Node(inner) => inner,
                GuardedValue::Raw(_) => return Err(GuardError::PathNotFound(path.clone())),
            };
        }
        Ok((node, leaf))
    }

    fn get_segment(&self, segment: &str) -> Option<GuardedValue> {
        match self.kind {
            NodeKind::Object => self.get(segment),
            NodeKind::Array => self.get_index(segment.parse().ok()?),
        }
    }

    fn parse_index(segment: &str, path: &KeyPath) -> GuardResult<usize> {
        segment
            .parse()
            .map_err(|_| GuardError::PathNotFound(path.clone()))
    }

    /// Materialize the current contents as a plain value
    ///
    /// # Errors
    /// `LockPoisoned` if a writer panicked mid-mutation.
    pub fn snapshot(&self) -> GuardResult<Value> {
        let slots = self.read_slots()?;
        match &*slots {
            Slots::Map(map) => {
                let mut entries = serde_json::Map::new();
                for (key, value) in map {
                    entries.insert(key.clone(), value.snapshot()?);
                }
                Ok(Value::Object(entries))
            }
            Slots::List(list) => {
                let mut items = Vec::with_capacity(list.len());
                for value in list {
                    items.push(value.snapshot()?);
                }
                Ok(Value::Array(items))
            }
        }
    }
}
