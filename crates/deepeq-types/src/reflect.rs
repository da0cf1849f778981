//! The [`Reflect`] trait and the closed set of value shapes it exposes.

use std::any::Any;
use std::borrow::Cow;

use crate::record::Record;
use crate::view::{MapView, Sequence};

/// A value that can describe its own shape to the diff engine.
///
/// Implementors return a [`Kind`] borrowing from `self`. Everything the
/// engine knows about a value comes through this trait: its dynamic type
/// identity, its shape, and the optional error and equality capabilities.
pub trait Reflect {
    /// The shape of this value.
    fn reflect(&self) -> Kind<'_>;

    /// Dynamic type identity. Two values are only compared structurally
    /// when their type names match.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Error capability: the message this value reports, if it is an
    /// error-like value. A nil value behind the capability returns `None`.
    fn error_message(&self) -> Option<String> {
        None
    }

    /// Custom equality capability for record types.
    ///
    /// `Some(eq)` replaces field-by-field comparison with `eq`. `other`
    /// always has the same [`Reflect::type_name`] as `self`; see
    /// [`compare_with`] for the usual implementation.
    fn equal_hook(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Access to the concrete value for downcasting, for `'static` types
    /// that opt in.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// The shape of a reflected value.
pub enum Kind<'a> {
    /// Untyped absence.
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(Cow<'a, str>),
    /// A pointer-like or interface-like container. `None` is a nil pointer.
    Indirect(Option<&'a dyn Reflect>),
    /// A composite with named members.
    Record(Record<'a>),
    /// A key-value mapping. `None` is an absent mapping, as opposed to an
    /// empty one.
    Map(Option<&'a dyn MapView>),
    /// A fixed-size sequence.
    Array(&'a dyn Sequence),
    /// A variable-length sequence. `None` is an absent sequence.
    Slice(Option<&'a dyn Sequence>),
    /// A value with no comparison rule: functions, channels and the like.
    Opaque,
}

impl Kind<'_> {
    /// Short name of the shape, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool(_) => "bool",
            Kind::Int(_) => "int",
            Kind::Uint(_) => "uint",
            Kind::Float(_) => "float",
            Kind::Str(_) => "string",
            Kind::Indirect(_) => "indirect",
            Kind::Record(_) => "record",
            Kind::Map(_) => "map",
            Kind::Array(_) => "array",
            Kind::Slice(_) => "slice",
            Kind::Opaque => "opaque",
        }
    }

    /// The numeric value of an `Int`, `Uint` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Kind::Int(v) => Some(v as f64),
            Kind::Uint(v) => Some(v as f64),
            Kind::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// Types with their own notion of equality.
///
/// Hook it into the engine from [`Reflect::equal_hook`] with
/// [`compare_with`]; the type must also return `Some(self)` from
/// [`Reflect::as_any`].
pub trait Comparable: Any {
    fn equal(&self, other: &Self) -> bool;
}

/// Run `this`'s [`Comparable::equal`] against `other`.
///
/// Returns `None` when `other` cannot be downcast to `T`, in which case the
/// engine falls back to structural comparison.
pub fn compare_with<T: Comparable>(this: &T, other: &dyn Reflect) -> Option<bool> {
    other
        .as_any()?
        .downcast_ref::<T>()
        .map(|other| this.equal(other))
}

/// The untyped absent value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nil;

impl Reflect for Nil {
    fn reflect(&self) -> Kind<'_> {
        Kind::Nil
    }

    fn type_name(&self) -> &'static str {
        "nil"
    }
}

/// Whether `value` is the untyped absent value.
pub fn is_nil(value: &dyn Reflect) -> bool {
    matches!(value.reflect(), Kind::Nil)
}
