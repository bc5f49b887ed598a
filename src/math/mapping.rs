use std::{fmt::Debug, hash::Hash};

use thiserror::Error;

use super::Map;

/// Errors that can occur when mutating a [`MutableMapping`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The mapping is a read-only view and does not support the named operation.
    #[error("mapping is read-only, `{operation}` is not supported")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

/// A (partial) function from `K` to `V` which can be queried for single keys.
///
/// This is the common interface of genuine mappings like [`HashMapping`] and
/// derived views like [`super::ReflexiveMap`], so consumers can be written
/// once for both.
pub trait Mapping<K, V> {
    /// Returns the value associated with `key` or `None` if `key` is not in the domain.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is in the domain of the mapping.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the mapping has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, M: Mapping<K, V>> Mapping<K, V> for &M {
    fn get(&self, key: &K) -> Option<&V> {
        M::get(self, key)
    }
    fn contains_key(&self, key: &K) -> bool {
        M::contains_key(self, key)
    }
    fn len(&self) -> usize {
        M::len(self)
    }
}

/// A [`Mapping`] that can be changed. Read-only views implement this trait as well,
/// they report every mutation attempt as [`MappingError::Unsupported`].
pub trait MutableMapping<K, V>: Mapping<K, V> {
    /// Associates `key` with `value`, returning the previously associated value.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MappingError>;

    /// Removes `key` from the domain, returning the value it was mapped to.
    fn remove(&mut self, key: &K) -> Result<Option<V>, MappingError>;
}

/// A [`MutableMapping`] that is backed by a [`Map`]. This is what the copy engine
/// uses to record which node of the destination corresponds to which node of the source.
#[derive(Clone, PartialEq, Eq)]
pub struct HashMapping<K: Hash + Eq, V>(Map<K, V>);

impl<K: Hash + Eq, V> Default for HashMapping<K, V> {
    fn default() -> Self {
        Self(Map::default())
    }
}

impl<K: Hash + Eq, V> HashMapping<K, V> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mapping which can hold `capacity` entries without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Map::with_capacity_and_hasher(capacity, Default::default()))
    }

    /// Iterates over all `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.0.iter()
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> std::collections::hash_map::Keys<'_, K, V> {
        self.0.keys()
    }

    /// Iterates over the values in arbitrary order.
    pub fn values(&self) -> std::collections::hash_map::Values<'_, K, V> {
        self.0.values()
    }

    /// Consumes the mapping and returns the underlying [`Map`].
    pub fn into_inner(self) -> Map<K, V> {
        self.0
    }
}

impl<K: Hash + Eq, V> Mapping<K, V> for HashMapping<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.0.get(key)
    }
    fn contains_key(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Hash + Eq, V> MutableMapping<K, V> for HashMapping<K, V> {
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MappingError> {
        Ok(self.0.insert(key, value))
    }
    fn remove(&mut self, key: &K) -> Result<Option<V>, MappingError> {
        Ok(self.0.remove(key))
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashMapping<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a HashMapping<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Hash + Eq + Debug, V: Debug> Debug for HashMapping<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_mapping_overwrites() {
        let mut mapping = HashMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.insert('a', 1), Ok(None));
        assert_eq!(mapping.insert('a', 2), Ok(Some(1)));
        assert_eq!(mapping.get(&'a'), Some(&2));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.remove(&'a'), Ok(Some(2)));
        assert!(!mapping.contains_key(&'a'));
    }
}
