use std::fmt::Debug;

use crate::{math::Bijection, prelude::*};

/// A snapshot that associates each state of an automaton with a dense index in `0..size`,
/// for use in array based algorithms.
///
/// The indices are assigned in the iteration order of [`Automaton::states`] at the moment the
/// snapshot is taken. Any structural change of the automaton (adding, removing or clearing
/// states) advances its generation, after which the snapshot is stale. Staleness can be
/// checked with [`StateIds::is_current`] and [`StateIds::validate`].
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(1));
/// let q0 = dfa.add_state(None).unwrap();
/// let q1 = dfa.add_state(None).unwrap();
/// let ids = dfa.state_ids();
/// assert_eq!(ids.index(q1), Some(1));
/// assert_eq!(ids.state(0), Some(q0));
/// assert!(ids.is_current(&dfa));
///
/// dfa.add_state(None).unwrap();
/// assert!(ids.validate(&dfa).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct StateIds<S: Ord> {
    ids: Bijection<usize, S>,
    generation: u64,
}

impl<S: Ord + Copy + Debug> StateIds<S> {
    /// Numbers the given `states` consecutively and remembers the `generation` of the
    /// automaton they were taken from.
    pub fn new<I: IntoIterator<Item = S>>(states: I, generation: u64) -> Self {
        Self {
            ids: states.into_iter().enumerate().collect(),
            generation,
        }
    }

    /// Returns the state with the given dense `index`.
    pub fn state(&self, index: usize) -> Option<S> {
        self.ids.get_by_left(&index).copied()
    }

    /// Returns the dense index of `state`.
    pub fn index(&self, state: S) -> Option<usize> {
        self.ids.get_by_right(&state).copied()
    }

    /// Returns the number of indexed states.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no state is indexed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the generation the snapshot was taken at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Iterates over the pairs of index and state in increasing index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, S)> + '_ {
        (0..self.len()).filter_map(|i| self.state(i).map(|q| (i, q)))
    }

    /// Returns `true` if `automaton` has not changed structurally since the snapshot was taken.
    pub fn is_current<M: Automaton<State = S> + ?Sized>(&self, automaton: &M) -> bool {
        self.generation == automaton.generation()
    }

    /// Returns the snapshot if it is still current for `automaton`, and
    /// [`AutomatonError::StaleStateIds`] otherwise.
    pub fn validate<M: Automaton<State = S> + ?Sized>(
        &self,
        automaton: &M,
    ) -> Result<&Self, AutomatonError> {
        if self.is_current(automaton) {
            Ok(self)
        } else {
            Err(AutomatonError::StaleStateIds {
                taken: self.generation,
                current: automaton.generation(),
            })
        }
    }
}
