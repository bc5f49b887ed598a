use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

/// A symbol of an alphabet, which is also the type of inputs that label transitions.
pub trait Symbol: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash {}
impl<S: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash> Symbol for S {}

/// An alphabet is an ordered, finite collection of [`Symbol`]s where each symbol is
/// associated with a unique index in `0..size()`.
///
/// Automata use this association to store transitions per input in dense tables.
/// The alphabet is owned by the automaton, but its contents are never validated by it.
pub trait Alphabet: Clone + Debug {
    /// The type of symbols in this alphabet.
    type Symbol: Symbol;

    /// Returns the number of symbols in the alphabet.
    fn size(&self) -> usize;

    /// Returns the symbol at position `index` or `None` if `index` is out of bounds.
    fn symbol(&self, index: usize) -> Option<Self::Symbol>;

    /// Returns the position of `symbol` or `None` if the symbol is not part of the alphabet.
    fn index_of(&self, symbol: Self::Symbol) -> Option<usize>;

    /// Returns an iterator over all symbols in the order given by their indices.
    fn universe(&self) -> impl Iterator<Item = Self::Symbol> + '_ {
        (0..self.size()).filter_map(|i| self.symbol(i))
    }

    /// Returns true if the given symbol is present in the alphabet.
    fn contains(&self, symbol: Self::Symbol) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Returns `true` if the alphabet has no symbols.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<A: Alphabet> Alphabet for &A {
    type Symbol = A::Symbol;
    fn size(&self) -> usize {
        A::size(self)
    }
    fn symbol(&self, index: usize) -> Option<Self::Symbol> {
        A::symbol(self, index)
    }
    fn index_of(&self, symbol: Self::Symbol) -> Option<usize> {
        A::index_of(self, symbol)
    }
}

/// Represents an alphabet where a [`Symbol`] is just a single `char`.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let alphabet = CharAlphabet::of_size(3);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['a', 'b', 'c']);
/// assert_eq!(alphabet.index_of('c'), Some(2));
/// assert_eq!(alphabet.index_of('d'), None);
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Creates a new [`CharAlphabet`] from the given symbols, keeping their order.
    /// Duplicates are dropped.
    pub fn new(symbols: Vec<char>) -> Self {
        Self(symbols.into_iter().unique().collect())
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self::new(value)
    }
}

/// Collects symbols in the order they are produced, like [`CharAlphabet::new`].
impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().collect())
    }
}

impl Alphabet for CharAlphabet {
    type Symbol = char;

    fn size(&self) -> usize {
        self.0.len()
    }

    fn symbol(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    fn index_of(&self, symbol: char) -> Option<usize> {
        self.0.iter().position(|c| *c == symbol)
    }

    fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

/// An alphabet of consecutive integers `start..=end`. The symbol `start` has index `0`.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let alphabet = IntAlphabet::new(1, 6);
/// assert_eq!(alphabet.size(), 6);
/// assert_eq!(alphabet.symbol(0), Some(1));
/// assert_eq!(alphabet.index_of(6), Some(5));
/// assert_eq!(alphabet.index_of(7), None);
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct IntAlphabet {
    start: i64,
    end: i64,
    size: usize,
}

impl IntAlphabet {
    /// Creates the alphabet containing all integers between `start` and `end` (both inclusive).
    ///
    /// Panics if the range is empty or has more symbols than can be indexed by `usize`.
    pub fn new(start: i64, end: i64) -> Self {
        assert!(start <= end, "empty integer range {start}..={end}");
        let size = usize::try_from(end as i128 - start as i128 + 1)
            .unwrap_or_else(|_| panic!("integer range {start}..={end} is too large to index"));
        Self { start, end, size }
    }
}

impl Alphabet for IntAlphabet {
    type Symbol = i64;

    fn size(&self) -> usize {
        self.size
    }

    fn symbol(&self, index: usize) -> Option<i64> {
        (index < self.size).then(|| (self.start as i128 + index as i128) as i64)
    }

    fn index_of(&self, symbol: i64) -> Option<usize> {
        (self.start..=self.end)
            .contains(&symbol)
            .then(|| (symbol as i128 - self.start as i128) as usize)
    }

    fn universe(&self) -> impl Iterator<Item = i64> + '_ {
        self.start..=self.end
    }
}
