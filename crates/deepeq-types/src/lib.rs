//! Reflection model for deepeq.
//!
//! Values take part in structural comparison by implementing [`Reflect`],
//! which exposes a value's dynamic type name and its shape as one of the
//! closed set of [`Kind`]s. Composite members, mappings and sequences are
//! reached through the type-erased [`Record`], [`MapView`] and [`Sequence`]
//! views, so the diff engine can walk any implementor without knowing its
//! concrete type.
//!
//! # Key Types
//!
//! - [`Reflect`] / [`Kind`] -- Type identity and value shape
//! - [`Record`] / [`Field`] -- Named members with accessibility and exclusion flags
//! - [`MapView`] / [`MapKey`] / [`Sequence`] -- Type-erased containers
//! - [`Comparable`] -- Opt-in custom equality
//! - [`Show`] -- `%v`-style rendering used in diff messages

mod impls;
mod json;
pub mod record;
pub mod reflect;
pub mod show;
pub mod view;

pub use record::{Field, Record};
pub use reflect::{compare_with, is_nil, Comparable, Kind, Nil, Reflect};
pub use show::{describe, Show};
pub use view::{MapKey, MapView, Sequence};
