//! Warden Mutation Policy
//!
//! The rule set mediating every property-level mutation on a guarded
//! value.
//!
//! # Core Concepts
//!
//! - [`GuardFlag`]: the single writable bit shared by every node spawned
//!   from one guarded root
//! - [`Mutation`]: the property-level operation taxonomy (write, delete,
//!   define)
//! - [`MutationPolicy`]: the allow/deny decision consulted before any
//!   mutation is applied
//! - [`DenialError`]: the condition raised for a rejected mutation
//!
//! Reads are never mediated; only mutations consult the policy.
//!
//! # Example
//!
//! ```rust
//! use warden_policy::{GuardFlag, Mutation, MutationPolicy};
//!
//! let flag = GuardFlag::new(true);
//! let policy = MutationPolicy::new(flag.clone());
//!
//! assert!(policy.authorize(Mutation::Write).is_ok());
//!
//! flag.set_writable(false);
//! let denial = policy.authorize(Mutation::Write).unwrap_err();
//! assert_eq!(denial.to_string(), "Object protected, you couldn't set data");
//! ```

#![warn(unreachable_pub)]

mod error;
mod flag;
mod policy;

// Re-exports
pub use error::DenialError;
pub use flag::GuardFlag;
pub use policy::{Mutation, MutationPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
