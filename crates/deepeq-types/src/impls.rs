//! [`Reflect`] for standard library types.

use std::any::Any;
use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::reflect::{Kind, Reflect};

macro_rules! reflect_scalar {
    ($variant:ident as $repr:ty: $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Kind<'_> {
                    Kind::$variant(*self as $repr)
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )+
    };
}

reflect_scalar!(Int as i64: i8, i16, i32, i64, isize);
reflect_scalar!(Uint as u64: u8, u16, u32, u64, usize);
reflect_scalar!(Float as f64: f32, f64);

impl Reflect for bool {
    fn reflect(&self) -> Kind<'_> {
        Kind::Bool(*self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Reflect for char {
    fn reflect(&self) -> Kind<'_> {
        Kind::Str(Cow::Owned(self.to_string()))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> Kind<'_> {
        Kind::Str(Cow::Borrowed(self))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Reflect for &str {
    fn reflect(&self) -> Kind<'_> {
        Kind::Str(Cow::Borrowed(self))
    }
}

/// `()` is the untyped absent value, like [`crate::Nil`].
impl Reflect for () {
    fn reflect(&self) -> Kind<'_> {
        Kind::Nil
    }

    fn type_name(&self) -> &'static str {
        "nil"
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Indirect(self.as_ref().map(|v| v as &dyn Reflect))
    }

    fn error_message(&self) -> Option<String> {
        self.as_ref().and_then(Reflect::error_message)
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Indirect(self.get().map(|v| v as &dyn Reflect))
    }

    fn error_message(&self) -> Option<String> {
        self.get().and_then(Reflect::error_message)
    }
}

// Owning pointers are transparent: they report their pointee's identity
// and shape, so `Box<dyn Reflect>` compares by the concrete type inside.
macro_rules! reflect_transparent {
    ($($ptr:ident),+) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn reflect(&self) -> Kind<'_> {
                    (**self).reflect()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn error_message(&self) -> Option<String> {
                    (**self).error_message()
                }

                fn equal_hook(&self, other: &dyn Reflect) -> Option<bool> {
                    (**self).equal_hook(other)
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    (**self).as_any()
                }
            }
        )+
    };
}

reflect_transparent!(Box, Rc, Arc);

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Slice(Some(self))
    }
}

impl<T: Reflect> Reflect for &[T] {
    fn reflect(&self) -> Kind<'_> {
        Kind::Slice(Some(self))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Kind<'_> {
        Kind::Array(self)
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + fmt::Display + Eq + Hash + 'static,
    V: Reflect,
    S: BuildHasher,
{
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(Some(self))
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + fmt::Display + Ord + 'static,
    V: Reflect,
{
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(Some(self))
    }
}

impl<R> Reflect for fn() -> R {
    fn reflect(&self) -> Kind<'_> {
        Kind::Opaque
    }
}

impl<A, R> Reflect for fn(A) -> R {
    fn reflect(&self) -> Kind<'_> {
        Kind::Opaque
    }
}

impl<T> Reflect for Sender<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Opaque
    }
}

impl<T> Reflect for Receiver<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Opaque
    }
}
