//! Library for representing, mutating and structurally copying finite automata and graphs.
//!
//! The crate is organised in two layers. The first one is a mutable automaton model: the trait
//! [`Automaton`] gives read access to the states, the initial states and the transitions of an
//! automaton, and [`MutableAutomaton`] allows growing and shrinking it uniformly, independent of
//! how the automaton is stored. Variants are expressed through capabilities rather than through a
//! hierarchy. A [`automaton::DeterministicAutomaton`] admits at most one transition per state and
//! symbol and at most one initial state, [`automaton::Shrinkable`] automata can drop single states
//! and [`automaton::ModalTransitionSystem`]s distinguish may and must transitions. Which variant a
//! given automaton is can be queried once through [`automaton::Determinism`].
//!
//! States and transitions are opaque identities. Properties (the output of a Mealy transition,
//! the acceptance flag of a DFA state, ...) are attached to them and can be changed without
//! touching the structure. Dense indices for array based algorithms are obtained through
//! [`automaton::StateIds`], which remember the generation of the automaton they were taken from
//! and can detect when they became stale.
//!
//! The second layer is the structural copy engine in [`copy`]. It walks a source [`graph::Graph`]
//! (or anything that can be viewed as one, like an automaton through
//! [`graph::TransitionGraph`]) and rebuilds it in a destination [`graph::MutableGraph`], translating
//! node and edge properties along the way and recording which source node corresponds to which
//! destination node. The traversal order is a separate concern: [`copy::Plain`] enumerates every
//! node, whereas [`copy::Bfs`] and [`copy::Dfs`] only copy what is reachable from a set of start
//! nodes and discover the remaining nodes lazily.
//!
//! Finally, [`math::ReflexiveMap`] exposes a set as the identity mapping on it, so that code which
//! expects a [`math::Mapping`] can be fed an identity correspondence without allocating.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_model::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, CharAlphabet, IntAlphabet, Symbol},
        automaton::{
            Acceptor, Automaton, AutomatonError, DeterministicAutomaton, Determinism, ForAlphabet,
            HashAutomaton, MealyOutput, ModalEdge, ModalEdgeProperty, ModalTransitionSystem,
            ModalType, MooreOutput, MutableAutomaton, MutableDeterministic, Shrinkable, StateId,
            StateIds, SymbolOf, TransitionId, DFA, MTS, NFA,
        },
        automaton::{MealyMachine, MooreMachine},
        copy::{
            copy_automaton, copy_graph, copy_reachable, copy_universal_graph, Bfs, CopyError,
            CopyMethod, Dfs, GraphCopy, Plain, Traversal,
        },
        graph::{
            AutomatonSink, Graph, IndefiniteGraph, MutableGraph, SimpleGraph, TransitionEdge,
            TransitionGraph, UniversalGraph,
        },
        math::{self, HashMapping, Mapping, MutableMapping, ReflexiveMap},
        Property, Void,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate,
/// most notably the [`math::Mapping`] abstraction and the [`math::ReflexiveMap`] view.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the automaton model, its capabilities and a hash based implementation.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{Automaton, MutableAutomaton};

/// Graph contracts and adapters that let automata be read and written as graphs.
pub mod graph;

/// The structural copy engine.
pub mod copy;

use std::fmt::Debug;

/// A property is simply a type that can be attached to states or transitions. The model never
/// looks into properties beyond comparing and cloning them.
pub trait Property: Clone + Eq + Debug {}

impl<T: Eq + Clone + Debug> Property for T {}

/// Represents the absence of a property. The idea is that this can be used as the property type
/// of automata that do not carry any information on their states or transitions, for example the
/// transitions of a DFA.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Void;

impl Debug for Void {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#")
    }
}
