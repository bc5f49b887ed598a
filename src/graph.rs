use std::{fmt::Debug, hash::Hash};

use crate::automaton::AutomatonError;

mod simple;
pub use simple::SimpleGraph;

mod adapter;
pub use adapter::{AutomatonSink, TransitionEdge, TransitionGraph};

/// A graph whose nodes may be infinite in number. It can only be explored from a given node
/// by following outgoing edges.
pub trait IndefiniteGraph {
    /// Identifies a node.
    type Node: Copy + Eq + Hash + Debug;
    /// Identifies an edge.
    type Edge: Copy + Debug;

    /// Iterates over the edges that leave `node`.
    fn outgoing_edges(&self, node: Self::Node) -> impl Iterator<Item = Self::Edge> + '_;

    /// Returns the node that `edge` leads to.
    fn target(&self, edge: Self::Edge) -> Self::Node;

    /// Iterates over the targets of all edges that leave `node`.
    fn adjacent(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        self.outgoing_edges(node).map(move |e| self.target(e))
    }
}

/// A graph with a finite, enumerable set of nodes.
pub trait Graph: IndefiniteGraph {
    /// Iterates over all nodes.
    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().count()
    }
}

/// A [`Graph`] whose nodes and edges carry properties.
pub trait UniversalGraph: Graph {
    /// The property of a node.
    type NodeProperty;
    /// The property of an edge.
    type EdgeProperty;

    /// Returns the property of `node`.
    fn node_property(&self, node: Self::Node) -> Self::NodeProperty;

    /// Returns the property of `edge`.
    fn edge_property(&self, edge: Self::Edge) -> Self::EdgeProperty;
}

/// The destination contract of the copy engine: a graph that can grow by nodes and edges.
/// Failures are reported as [`AutomatonError`] since automata are the typical destination.
pub trait MutableGraph {
    /// Identifies a node.
    type Node: Copy + Eq + Hash + Debug;
    /// Identifies an edge.
    type Edge: Copy + Debug;
    /// The property that a new node is created with.
    type NodeProperty;
    /// The property that a new edge is created with.
    type EdgeProperty;

    /// Adds a node carrying `property`.
    fn add_node(&mut self, property: Self::NodeProperty) -> Result<Self::Node, AutomatonError>;

    /// Adds an edge from `source` to `target` carrying `property`.
    fn connect(
        &mut self,
        source: Self::Node,
        target: Self::Node,
        property: Self::EdgeProperty,
    ) -> Result<Self::Edge, AutomatonError>;
}
