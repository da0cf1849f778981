//! Structural diff engine.
//!
//! Walks two [`Reflect`](deepeq_types::Reflect) values of the same declared
//! shape and reports every path at which they differ, as human-readable
//! strings, or `None` when they are equivalent.
//!
//! # Key Types
//!
//! - [`Comparator`] / [`DiffConfig`] -- Comparison with explicit tunables
//! - [`Comparison`] -- Diffs plus non-fatal [`Warning`]s
//! - [`DiffError`] -- Depth, type and unsupported-kind diagnostics
//! - [`equal`] / [`contains`] -- Default-configured entry points

pub mod config;
pub mod contains;
pub mod engine;
pub mod error;

pub use config::DiffConfig;
pub use contains::{contains, contains_with};
pub use engine::{equal, Comparator, Comparison};
pub use error::{DiffError, Warning};

pub use deepeq_types as types;
