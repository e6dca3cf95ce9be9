//! Warden Guard
//!
//! Write-protected wrapper over dynamic, deeply nested data values.
//!
//! # Core Concepts
//!
//! - [`Guard`]: the root handle bundling protected data with `lock` and
//!   `unlock` controls; starts locked
//! - [`GuardedValue`]: a stored slot, either raw or a guarded node
//! - [`GuardedNode`]: the interception layer over one composite; every
//!   mutation consults the shared flag first
//! - [`KeyPath`]: hierarchical addressing of nested slots
//! - [`WrapStrategy`]: how a source is brought under a guard —
//!   [`Intercepting`] (real protection) or [`Passthrough`] (identity,
//!   degraded mode)
//!
//! Protection is graph-wide: composites assigned while unlocked are
//! themselves wrapped under the same flag, so there is no escape hatch
//! through newly attached sub-values.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use warden_guard::Guard;
//!
//! let guard = Guard::new(json!({ "user": { "name": "ada" } }));
//! let user = guard.data().as_node().unwrap().get("user").unwrap();
//! let user = user.as_node().unwrap();
//!
//! // locked: the nested write is rejected and nothing changes
//! assert!(user.set("name", json!("grace")).is_err());
//!
//! guard.unlock();
//! user.set("name", json!("grace")).unwrap();
//! guard.lock();
//!
//! assert_eq!(
//!     guard.snapshot().unwrap(),
//!     json!({ "user": { "name": "grace" } })
//! );
//! ```

#![warn(unreachable_pub)]

mod error;
mod guard;
mod node;
mod path;
mod strategy;
mod value;

// Re-exports
pub use error::{GuardError, GuardResult};
pub use guard::Guard;
pub use node::{GuardedNode, NodeKind};
pub use path::{KeyPath, PathError};
pub use strategy::{Intercepting, Passthrough, WrapStrategy};
pub use value::GuardedValue;

// Policy surface, re-exported for callers matching on denials
pub use warden_policy::{DenialError, GuardFlag, Mutation, MutationPolicy};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for guarded-value operations
    pub use crate::{
        DenialError, Guard, GuardError, GuardResult, GuardedNode, GuardedValue, Intercepting,
        KeyPath, NodeKind, Passthrough, WrapStrategy,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
