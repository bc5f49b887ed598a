use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;
use thiserror::Error;

use crate::prelude::*;

mod id;
pub use id::{StateId, TransitionId};

mod state_ids;
pub use state_ids::StateIds;

mod deterministic;
pub use deterministic::{DeterministicAutomaton, MutableDeterministic};

mod shrinkable;
pub use shrinkable::Shrinkable;

mod modal;
pub use modal::{ModalEdge, ModalEdgeProperty, ModalTransitionSystem, ModalType};

mod semantics;
pub use semantics::{Acceptor, MealyOutput, MooreOutput};

mod impls;
pub use impls::{HashAutomaton, MealyMachine, MooreMachine, DFA, MTS, NFA};

/// Type alias for extracting the type of input symbols of an [`Automaton`].
pub type SymbolOf<M> = <<M as Automaton>::Alphabet as Alphabet>::Symbol;
/// Type alias for extracting the state type of an [`Automaton`].
pub type StateOf<M> = <M as Automaton>::State;
/// Type alias for extracting the transition type of an [`Automaton`].
pub type TransitionOf<M> = <M as Automaton>::Transition;

/// Recoverable errors that mutating an automaton can produce. Everything else, like passing
/// a state that belongs to a different automaton, is a violation of the contract and panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// The automaton admits only a single initial state and already has one.
    #[error("automaton admits at most one initial state")]
    MultipleInitialStates,
    /// The backing store is bounded and full.
    #[error("automaton is limited to {capacity} states")]
    CapacityExceeded {
        /// The maximal number of states of the backing store.
        capacity: usize,
    },
    /// A deterministic automaton was asked to hold more than one transition for one input.
    #[error("deterministic automaton cannot hold {count} transitions for a single input")]
    NondeterministicTransitions {
        /// Number of transitions that were requested.
        count: usize,
    },
    /// A [`StateIds`] snapshot was used after the automaton was structurally modified.
    #[error("state ids were taken at generation {taken}, but the automaton is at generation {current}")]
    StaleStateIds {
        /// Generation at which the snapshot was taken.
        taken: u64,
        /// Current generation of the automaton.
        current: u64,
    },
}

/// Closed tag that tells which variant of the contract an automaton implements. It can be
/// queried once through [`Automaton::determinism`] instead of testing for concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Determinism {
    /// At most one initial state and at most one transition per state and symbol.
    Deterministic,
    /// Arbitrarily many initial states and transitions per state and symbol.
    Nondeterministic,
}

impl Determinism {
    /// Returns `true` for [`Determinism::Deterministic`].
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Determinism::Deterministic)
    }
}

/// Read access to an automaton. States and transitions are opaque identities, the properties
/// attached to them may be absent.
///
/// Queries never fail. Asking for the transitions of a pair that has none, or of a state that
/// does not (or no longer) exist, simply produces an empty iterator.
pub trait Automaton {
    /// The alphabet over which the automaton reads its inputs.
    type Alphabet: Alphabet;
    /// Identifies a state, unique within one automaton.
    type State: Copy + Eq + Hash + Ord + Debug;
    /// Identifies a transition, unique within one automaton.
    type Transition: Copy + Eq + Hash + Debug;
    /// The type of property that states may carry.
    type StateProperty: Property;
    /// The type of property that transitions may carry.
    type TransitionProperty: Property;

    /// Returns a reference to the alphabet.
    fn alphabet(&self) -> &Self::Alphabet;

    /// Tells which variant of the contract this automaton implements.
    fn determinism(&self) -> Determinism;

    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns `true` if the automaton has no states.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterates over all states.
    fn states(&self) -> impl Iterator<Item = Self::State> + '_;

    /// Returns `true` if `state` belongs to the automaton.
    fn contains_state(&self, state: Self::State) -> bool;

    /// Iterates over all initial states.
    fn initial_states(&self) -> impl Iterator<Item = Self::State> + '_;

    /// Returns `true` if `state` is initial.
    fn is_initial(&self, state: Self::State) -> bool {
        self.initial_states().contains(&state)
    }

    /// Returns the property of `state`, if there is one.
    fn state_property(&self, state: Self::State) -> Option<&Self::StateProperty>;

    /// Iterates over the transitions that leave `state` on `symbol`.
    fn transitions(
        &self,
        state: Self::State,
        symbol: SymbolOf<Self>,
    ) -> impl Iterator<Item = Self::Transition> + '_;

    /// Returns the target of `transition`, `None` if it is dangling.
    fn target(&self, transition: Self::Transition) -> Option<Self::State>;

    /// Returns the property of `transition`, if there is one.
    fn transition_property(
        &self,
        transition: Self::Transition,
    ) -> Option<&Self::TransitionProperty>;

    /// Iterates over the states that can be reached from `state` on `symbol`.
    fn successors(
        &self,
        state: Self::State,
        symbol: SymbolOf<Self>,
    ) -> impl Iterator<Item = Self::State> + '_ {
        self.transitions(state, symbol)
            .filter_map(move |t| self.target(t))
    }

    /// Returns the current generation. The generation changes whenever states are added or
    /// removed, which is what invalidates [`StateIds`].
    fn generation(&self) -> u64;

    /// Takes a snapshot that associates every state with a dense index in `0..size()`.
    /// The snapshot remains valid until the next structural change.
    fn state_ids(&self) -> StateIds<Self::State> {
        StateIds::new(self.states(), self.generation())
    }

    /// Renders the transition structure as a table with one row per state and one column
    /// per symbol. Initial states are marked with an arrow.
    fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet().universe().map(|s| format!("{:?}", s))),
        );
        for state in self.states() {
            let mut row = vec![format!(
                "{}{:?} : {}",
                if self.is_initial(state) { "→ " } else { "" },
                state,
                show_property(self.state_property(state))
            )];
            for sym in self.alphabet().universe() {
                let cell = self
                    .transitions(state, sym)
                    .map(|t| {
                        let target = self
                            .target(t)
                            .map(|q| format!("{:?}", q))
                            .unwrap_or_else(|| "?".to_string());
                        match self.transition_property(t) {
                            Some(p) => format!("{target} : {p:?}"),
                            None => target,
                        }
                    })
                    .join(", ");
                row.push(if cell.is_empty() { "-".to_string() } else { cell });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

fn show_property<P: Debug>(property: Option<&P>) -> String {
    property
        .map(|p| format!("{:?}", p))
        .unwrap_or_else(|| "-".to_string())
}

/// Uniform mutation of an automaton.
///
/// Mutations that can fail for reasons the caller may recover from return an
/// [`AutomatonError`], and in that case they leave the automaton exactly as it was. Passing
/// identities that do not belong to the automaton, or symbols outside of its alphabet,
/// violates the contract and panics.
pub trait MutableAutomaton: Automaton {
    /// Adds a fresh state carrying `property`.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = dfa.add_state(Some(false)).unwrap();
    /// let q1 = dfa.add_state(None).unwrap();
    /// assert_eq!(dfa.size(), 2);
    /// assert_eq!(dfa.state_property(q0), Some(&false));
    /// assert_eq!(dfa.state_property(q1), None);
    /// ```
    fn add_state(
        &mut self,
        property: Option<Self::StateProperty>,
    ) -> Result<Self::State, AutomatonError>;

    /// Adds a fresh state and marks it initial. Deterministic automata refuse this with
    /// [`AutomatonError::MultipleInitialStates`] if they already have an initial state, in
    /// which case no state is added.
    fn add_initial_state(
        &mut self,
        property: Option<Self::StateProperty>,
    ) -> Result<Self::State, AutomatonError> {
        if self.determinism().is_deterministic() && self.initial_states().next().is_some() {
            return Err(AutomatonError::MultipleInitialStates);
        }
        let state = self.add_state(property)?;
        self.set_initial(state, true)?;
        Ok(state)
    }

    /// Marks `state` as initial or removes the marking. For deterministic automata, marking
    /// a second state fails with [`AutomatonError::MultipleInitialStates`].
    fn set_initial(&mut self, state: Self::State, initial: bool) -> Result<(), AutomatonError>;

    /// Replaces the property of `state`.
    fn set_state_property(&mut self, state: Self::State, property: Option<Self::StateProperty>);

    /// Creates a transition that is not yet attached to any state. The target may be left
    /// open and set later through [`MutableAutomaton::set_transition_target`].
    fn create_transition(
        &mut self,
        target: Option<Self::State>,
        property: Option<Self::TransitionProperty>,
    ) -> Self::Transition;

    /// Replaces the property of `transition`.
    fn set_transition_property(
        &mut self,
        transition: Self::Transition,
        property: Option<Self::TransitionProperty>,
    );

    /// Replaces the target of `transition`.
    fn set_transition_target(&mut self, transition: Self::Transition, target: Option<Self::State>);

    /// Replaces all transitions leaving `state` on `symbol` by `transitions`. This is not
    /// additive, transitions that were attached to the pair before and are not contained in
    /// `transitions` are discarded. Transitions for other symbols remain untouched.
    fn set_transitions<I>(
        &mut self,
        state: Self::State,
        symbol: SymbolOf<Self>,
        transitions: I,
    ) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = Self::Transition>;

    /// Adds `transition` to the transitions leaving `state` on `symbol`.
    fn add_transition(
        &mut self,
        state: Self::State,
        symbol: SymbolOf<Self>,
        transition: Self::Transition,
    ) -> Result<(), AutomatonError> {
        let mut current = self.transitions(state, symbol).collect_vec();
        if !current.contains(&transition) {
            current.push(transition);
        }
        self.set_transitions(state, symbol, current)
    }

    /// Creates a transition to `target` with the given `property` and adds it to the
    /// transitions leaving `state` on `symbol`.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = nfa.add_initial_state(Some(false)).unwrap();
    /// let q1 = nfa.add_state(Some(true)).unwrap();
    /// nfa.add_new_transition(q0, 'a', q0, None).unwrap();
    /// nfa.add_new_transition(q0, 'a', q1, None).unwrap();
    /// assert_eq!(nfa.successors(q0, 'a').collect::<Vec<_>>(), vec![q0, q1]);
    /// assert_eq!(nfa.successors(q0, 'b').count(), 0);
    /// ```
    fn add_new_transition(
        &mut self,
        state: Self::State,
        symbol: SymbolOf<Self>,
        target: Self::State,
        property: Option<Self::TransitionProperty>,
    ) -> Result<Self::Transition, AutomatonError> {
        let existing = self.transitions(state, symbol).count();
        if self.determinism().is_deterministic() && existing > 0 {
            return Err(AutomatonError::NondeterministicTransitions {
                count: existing + 1,
            });
        }
        let transition = self.create_transition(Some(target), property);
        self.add_transition(state, symbol, transition)?;
        Ok(transition)
    }

    /// Removes exactly the transitions leaving `state` on `symbol`.
    fn remove_transitions(&mut self, state: Self::State, symbol: SymbolOf<Self>);

    /// Removes every transition leaving `state`, for all symbols at once.
    fn remove_all_transitions(&mut self, state: Self::State);

    /// Removes all states, transitions and initial markings. States that are added
    /// afterwards are numbered from scratch.
    fn clear(&mut self);
}

/// Implemented by automata that can be created for a given [`Alphabet`], which may then be
/// grown with the methods of [`MutableAutomaton`].
pub trait ForAlphabet<A: Alphabet>: Sized {
    /// Creates an empty instance of `Self` for the given [`Alphabet`].
    fn for_alphabet(from: A) -> Self;

    /// Creates an empty instance of `Self` for the given [`Alphabet`] and a hint for the number
    /// of states, allowing for preallocation of memory.
    fn for_alphabet_size_hint(from: A, _size_hint: usize) -> Self {
        Self::for_alphabet(from)
    }
}
