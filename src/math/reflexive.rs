use std::{
    collections::{BTreeSet, HashSet},
    fmt::Debug,
    hash::{BuildHasher, Hash},
};

use super::{Mapping, MappingError, MutableMapping};

/// A set that can back a [`ReflexiveMap`]. It must be able to answer membership
/// queries, hand out a reference to the stored element and enumerate its elements
/// in a stable order.
pub trait Domain<T> {
    /// Returns a reference to the element of the set that equals `element`.
    fn lookup(&self, element: &T) -> Option<&T>;
    /// Returns the number of elements.
    fn size(&self) -> usize;
    /// Iterates over the elements in the set's own order.
    fn elements<'s>(&'s self) -> impl Iterator<Item = &'s T> + 's
    where
        T: 's;

    /// Returns `true` if `element` is contained in the set.
    fn includes(&self, element: &T) -> bool {
        self.lookup(element).is_some()
    }
}

impl<T: Hash + Eq, S: BuildHasher> Domain<T> for HashSet<T, S> {
    fn lookup(&self, element: &T) -> Option<&T> {
        self.get(element)
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn elements<'s>(&'s self) -> impl Iterator<Item = &'s T> + 's
    where
        T: 's,
    {
        self.iter()
    }
}

impl<T: Ord> Domain<T> for BTreeSet<T> {
    fn lookup(&self, element: &T) -> Option<&T> {
        self.get(element)
    }
    fn size(&self) -> usize {
        self.len()
    }
    fn elements<'s>(&'s self) -> impl Iterator<Item = &'s T> + 's
    where
        T: 's,
    {
        self.iter()
    }
}

/// A read-only view that maps every element of a set to itself.
///
/// The view only holds a reference to the backing set `D`, nothing is materialized.
/// Keys and values both coincide with `D`, and iterating the view produces the pairs
/// `(d, d)` in the iteration order of `D`. Mutating the view through
/// [`MutableMapping`] always fails with [`MappingError::Unsupported`].
///
/// # Example
/// ```
/// use automata_model::math::{Mapping, ReflexiveMap};
/// use std::collections::BTreeSet;
///
/// let states = BTreeSet::from([0, 1, 2]);
/// let identity = ReflexiveMap::new(&states);
/// assert_eq!(identity.get(&1), Some(&1));
/// assert_eq!(identity.get(&3), None);
/// assert_eq!(identity.iter().collect::<Vec<_>>(), vec![(&0, &0), (&1, &1), (&2, &2)]);
/// ```
pub struct ReflexiveMap<'a, T, D: Domain<T> + ?Sized> {
    domain: &'a D,
    _element: std::marker::PhantomData<&'a T>,
}

impl<'a, T, D: Domain<T> + ?Sized> Clone for ReflexiveMap<'a, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, D: Domain<T> + ?Sized> Copy for ReflexiveMap<'a, T, D> {}

impl<'a, T, D: Domain<T> + ?Sized> ReflexiveMap<'a, T, D> {
    /// Creates a reflexive view of the given `domain`.
    pub fn new(domain: &'a D) -> Self {
        Self {
            domain,
            _element: std::marker::PhantomData,
        }
    }

    /// Returns `true` if `value` is in the image of the view, which is the domain itself.
    pub fn contains_value(&self, value: &T) -> bool {
        self.domain.includes(value)
    }

    /// The key set, which is the backing set.
    pub fn key_set(&self) -> &'a D {
        self.domain
    }

    /// The value set, which again is the backing set.
    pub fn value_set(&self) -> &'a D {
        self.domain
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.domain.elements()
    }

    /// Iterates over the values, these coincide with the keys.
    pub fn values(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.domain.elements()
    }

    /// Iterates over the pairs `(d, d)` for every `d` in the domain.
    pub fn iter(&self) -> impl Iterator<Item = (&'a T, &'a T)> + 'a {
        self.domain.elements().map(|d| (d, d))
    }
}

impl<'a, T, D: Domain<T> + ?Sized> Mapping<T, T> for ReflexiveMap<'a, T, D> {
    fn get(&self, key: &T) -> Option<&T> {
        self.domain.lookup(key)
    }
    fn contains_key(&self, key: &T) -> bool {
        self.domain.includes(key)
    }
    fn len(&self) -> usize {
        self.domain.size()
    }
}

impl<'a, T, D: Domain<T> + ?Sized> MutableMapping<T, T> for ReflexiveMap<'a, T, D> {
    fn insert(&mut self, _key: T, _value: T) -> Result<Option<T>, MappingError> {
        Err(MappingError::Unsupported {
            operation: "insert",
        })
    }
    fn remove(&mut self, _key: &T) -> Result<Option<T>, MappingError> {
        Err(MappingError::Unsupported {
            operation: "remove",
        })
    }
}

impl<'a, T: Debug, D: Domain<T> + ?Sized> Debug for ReflexiveMap<'a, T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
