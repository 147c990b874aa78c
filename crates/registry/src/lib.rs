//! Resolved bytecode revision registry.
//!
//! Folds the curated history from `bcrev-registry-spec` together with facts
//! extracted from each revision's artifacts into immutable
//! [`RevisionRecord`]s, answers lookup and translation queries over them, and
//! persists the whole set as a JSON manifest.
//!
//! - [`tokens`]: the canonical token enumeration
//! - [`signatures`]: builtin argument-count bounds
//! - [`adapter`]: per-revision lookup and translation operations
//! - [`builder`] / [`registry`]: assembly and queries
//! - [`manifest`]: JSON persistence

pub mod adapter;
pub mod builder;
mod error;
pub mod manifest;
pub mod record;
pub mod registry;
pub mod signatures;
pub mod tokens;

pub use adapter::{Adapter, FunctionSignature, LOCAL_TOKEN_MAX, TokenMapping};
pub use builder::RegistryBuilder;
pub use error::{RegistryError, Result};
pub use record::{RevisionRecord, Snapshot};
pub use registry::Registry;
pub use signatures::Arity;
pub use tokens::{CANONICAL_TOKENS, CanonicalToken};

#[cfg(test)]
mod tests;
