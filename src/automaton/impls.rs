pub(crate) mod hash_automaton;
pub use hash_automaton::HashAutomaton;

use super::ModalEdge;
use crate::{alphabet::CharAlphabet, Void};

/// A deterministic finite automaton, i.e. a deterministic automaton whose states carry an
/// acceptance flag.
pub type DFA<A = CharAlphabet> = HashAutomaton<A, bool, Void, true>;

/// A nondeterministic finite automaton.
pub type NFA<A = CharAlphabet> = HashAutomaton<A, bool, Void, false>;

/// A deterministic automaton whose transitions carry an output of type `O`.
pub type MealyMachine<A = CharAlphabet, O = usize> = HashAutomaton<A, Void, O, true>;

/// A deterministic automaton whose states carry an output of type `O`.
pub type MooreMachine<A = CharAlphabet, O = usize> = HashAutomaton<A, O, Void, true>;

/// A modal transition system, whose transitions are either may or must transitions.
pub type MTS<A = CharAlphabet> = HashAutomaton<A, Void, ModalEdge, false>;
