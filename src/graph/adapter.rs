use std::fmt::Debug;

use super::{Graph, IndefiniteGraph, MutableGraph, UniversalGraph};
use crate::prelude::*;

/// An edge of a [`TransitionGraph`]. It bundles the transition with the state it leaves, the
/// symbol it is taken on and the state it reaches.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionEdge<S, Sym, T> {
    /// The state the transition leaves.
    pub source: S,
    /// The symbol the transition is taken on.
    pub symbol: Sym,
    /// The transition itself.
    pub transition: T,
    /// The state the transition leads to.
    pub target: S,
}

impl<S: Debug, Sym: Debug, T: Debug> Debug for TransitionEdge<S, Sym, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} -{:?}|{:?}-> {:?}",
            self.source, self.symbol, self.transition, self.target
        )
    }
}

/// Views an [`Automaton`] as a [`UniversalGraph`]. Nodes are the states, and there is one
/// edge for every transition whose target is set. Dangling transitions are not part of the
/// graph.
pub struct TransitionGraph<'a, M: Automaton + ?Sized> {
    automaton: &'a M,
}

impl<'a, M: Automaton + ?Sized> Clone for TransitionGraph<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: Automaton + ?Sized> Copy for TransitionGraph<'a, M> {}

impl<'a, M: Automaton + ?Sized> TransitionGraph<'a, M> {
    /// Creates the graph view of `automaton`.
    pub fn new(automaton: &'a M) -> Self {
        Self { automaton }
    }

    /// Returns the viewed automaton.
    pub fn automaton(&self) -> &'a M {
        self.automaton
    }
}

impl<'a, M: Automaton + ?Sized> IndefiniteGraph for TransitionGraph<'a, M> {
    type Node = M::State;
    type Edge = TransitionEdge<M::State, SymbolOf<M>, M::Transition>;

    fn outgoing_edges(&self, node: M::State) -> impl Iterator<Item = Self::Edge> + '_ {
        let automaton = self.automaton;
        automaton.alphabet().universe().flat_map(move |symbol| {
            automaton
                .transitions(node, symbol)
                .filter_map(move |transition| {
                    automaton.target(transition).map(|target| TransitionEdge {
                        source: node,
                        symbol,
                        transition,
                        target,
                    })
                })
        })
    }

    fn target(&self, edge: Self::Edge) -> M::State {
        edge.target
    }
}

impl<'a, M: Automaton + ?Sized> Graph for TransitionGraph<'a, M> {
    fn nodes(&self) -> impl Iterator<Item = M::State> + '_ {
        self.automaton.states()
    }

    fn node_count(&self) -> usize {
        self.automaton.size()
    }
}

impl<'a, M: Automaton + ?Sized> UniversalGraph for TransitionGraph<'a, M> {
    type NodeProperty = Option<M::StateProperty>;
    type EdgeProperty = (SymbolOf<M>, Option<M::TransitionProperty>);

    fn node_property(&self, node: M::State) -> Self::NodeProperty {
        self.automaton.state_property(node).cloned()
    }

    fn edge_property(&self, edge: Self::Edge) -> Self::EdgeProperty {
        (
            edge.symbol,
            self.automaton.transition_property(edge.transition).cloned(),
        )
    }
}

/// Lets a [`MutableAutomaton`] be the destination of a graph copy. New nodes become states,
/// and connecting two nodes adds a transition on the symbol carried by the edge property.
pub struct AutomatonSink<'a, M: MutableAutomaton + ?Sized> {
    automaton: &'a mut M,
}

impl<'a, M: MutableAutomaton + ?Sized> AutomatonSink<'a, M> {
    /// Wraps `automaton`.
    pub fn new(automaton: &'a mut M) -> Self {
        Self { automaton }
    }

    /// Gives access to the wrapped automaton.
    pub fn automaton(&mut self) -> &mut M {
        self.automaton
    }
}

impl<'a, M: MutableAutomaton + ?Sized> MutableGraph for AutomatonSink<'a, M> {
    type Node = M::State;
    type Edge = M::Transition;
    type NodeProperty = Option<M::StateProperty>;
    type EdgeProperty = (SymbolOf<M>, Option<M::TransitionProperty>);

    fn add_node(&mut self, property: Self::NodeProperty) -> Result<M::State, AutomatonError> {
        self.automaton.add_state(property)
    }

    fn connect(
        &mut self,
        source: M::State,
        target: M::State,
        (symbol, property): Self::EdgeProperty,
    ) -> Result<M::Transition, AutomatonError> {
        self.automaton
            .add_new_transition(source, symbol, target, property)
    }
}
