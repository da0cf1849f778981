//! Type-erased views over mappings and sequences.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::reflect::Reflect;

/// A mapping key.
///
/// Keys render into `map[key]` path segments through [`fmt::Display`] and are
/// looked up in the other mapping by downcasting, so they must be `'static`.
pub trait MapKey: fmt::Display {
    fn as_reflect(&self) -> &dyn Reflect;
    fn as_key_any(&self) -> &dyn Any;
}

impl<K: Reflect + fmt::Display + 'static> MapKey for K {
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_key_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased key-value mapping.
pub trait MapView {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the backing storage. Two views with the same storage
    /// are the same mapping.
    fn storage(&self) -> usize;

    /// All entries, in the mapping's own iteration order.
    fn entries(&self) -> Vec<(&dyn MapKey, &dyn Reflect)>;

    /// Look up the value stored under `key`. Keys of a different concrete
    /// type are never found.
    fn lookup(&self, key: &dyn MapKey) -> Option<&dyn Reflect>;
}

/// A type-erased indexable sequence.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Address of the first element. Two views with the same storage and
    /// the same length hold the same elements.
    fn storage(&self) -> usize;
}

fn address<T: ?Sized>(value: &T) -> usize {
    value as *const T as *const () as usize
}

impl<K, V, S> MapView for HashMap<K, V, S>
where
    K: Reflect + fmt::Display + Eq + Hash + 'static,
    V: Reflect,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn storage(&self) -> usize {
        address(self)
    }

    fn entries(&self) -> Vec<(&dyn MapKey, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn MapKey, v as &dyn Reflect))
            .collect()
    }

    fn lookup(&self, key: &dyn MapKey) -> Option<&dyn Reflect> {
        let key = key.as_key_any().downcast_ref::<K>()?;
        HashMap::get(self, key).map(|v| v as &dyn Reflect)
    }
}

impl<K, V> MapView for BTreeMap<K, V>
where
    K: Reflect + fmt::Display + Ord + 'static,
    V: Reflect,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn storage(&self) -> usize {
        address(self)
    }

    fn entries(&self) -> Vec<(&dyn MapKey, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn MapKey, v as &dyn Reflect))
            .collect()
    }

    fn lookup(&self, key: &dyn MapKey) -> Option<&dyn Reflect> {
        let key = key.as_key_any().downcast_ref::<K>()?;
        BTreeMap::get(self, key).map(|v| v as &dyn Reflect)
    }
}

impl MapView for serde_json::Map<String, serde_json::Value> {
    fn len(&self) -> usize {
        serde_json::Map::len(self)
    }

    fn storage(&self) -> usize {
        address(self)
    }

    fn entries(&self) -> Vec<(&dyn MapKey, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn MapKey, v as &dyn Reflect))
            .collect()
    }

    fn lookup(&self, key: &dyn MapKey) -> Option<&dyn Reflect> {
        let key = key.as_key_any().downcast_ref::<String>()?;
        serde_json::Map::get(self, key).map(|v| v as &dyn Reflect)
    }
}

impl<T: Reflect> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self.as_slice(), index).map(|v| v as &dyn Reflect)
    }

    fn storage(&self) -> usize {
        self.as_ptr() as usize
    }
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self.as_slice(), index).map(|v| v as &dyn Reflect)
    }

    fn storage(&self) -> usize {
        self.as_ptr() as usize
    }
}

impl<T: Reflect> Sequence for &[T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|v| v as &dyn Reflect)
    }

    fn storage(&self) -> usize {
        self.as_ptr() as usize
    }
}
