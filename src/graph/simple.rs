use std::fmt::Debug;

use itertools::Itertools;

use super::{Graph, IndefiniteGraph, MutableGraph, UniversalGraph};
use crate::automaton::AutomatonError;

/// An adjacency list graph whose nodes and edges are numbered consecutively in the order of
/// their creation. It never fails to grow.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let mut graph = SimpleGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// graph.connect(a, b, 'x');
/// assert_eq!(graph.adjacent(a).collect::<Vec<_>>(), vec![b]);
/// assert_eq!(graph.node_property(b), "B");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SimpleGraph<NP, EP> {
    nodes: Vec<SimpleNode<NP>>,
    edges: Vec<SimpleEdge<EP>>,
}

#[derive(Clone, PartialEq, Eq)]
struct SimpleNode<NP> {
    property: NP,
    outgoing: Vec<usize>,
}

#[derive(Clone, PartialEq, Eq)]
struct SimpleEdge<EP> {
    source: usize,
    target: usize,
    property: EP,
}

impl<NP, EP> Default for SimpleGraph<NP, EP> {
    fn default() -> Self {
        Self {
            nodes: vec![],
            edges: vec![],
        }
    }
}

impl<NP, EP> SimpleGraph<NP, EP> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its number.
    pub fn add_node(&mut self, property: NP) -> usize {
        self.nodes.push(SimpleNode {
            property,
            outgoing: vec![],
        });
        self.nodes.len() - 1
    }

    /// Adds an edge from `source` to `target` and returns its number. Panics if either node
    /// does not exist.
    pub fn connect(&mut self, source: usize, target: usize, property: EP) -> usize {
        assert!(target < self.nodes.len(), "unknown node {target}");
        let id = self.edges.len();
        self.nodes[source].outgoing.push(id);
        self.edges.push(SimpleEdge {
            source,
            target,
            property,
        });
        id
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all edges as triples of source, property and target.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &EP, usize)> + '_ {
        self.edges.iter().map(|e| (e.source, &e.property, e.target))
    }
}

impl<NP, EP> IndefiniteGraph for SimpleGraph<NP, EP> {
    type Node = usize;
    type Edge = usize;

    fn outgoing_edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.outgoing.iter().copied())
    }

    fn target(&self, edge: usize) -> usize {
        self.edges[edge].target
    }
}

impl<NP, EP> Graph for SimpleGraph<NP, EP> {
    fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.nodes.len()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<NP: Clone, EP: Clone> UniversalGraph for SimpleGraph<NP, EP> {
    type NodeProperty = NP;
    type EdgeProperty = EP;

    fn node_property(&self, node: usize) -> NP {
        self.nodes[node].property.clone()
    }

    fn edge_property(&self, edge: usize) -> EP {
        self.edges[edge].property.clone()
    }
}

impl<NP, EP> MutableGraph for SimpleGraph<NP, EP> {
    type Node = usize;
    type Edge = usize;
    type NodeProperty = NP;
    type EdgeProperty = EP;

    fn add_node(&mut self, property: NP) -> Result<usize, AutomatonError> {
        Ok(SimpleGraph::add_node(self, property))
    }

    fn connect(&mut self, source: usize, target: usize, property: EP) -> Result<usize, AutomatonError> {
        Ok(SimpleGraph::connect(self, source, target, property))
    }
}

impl<NP: Debug, EP: Debug> Debug for SimpleGraph<NP, EP> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "nodes: {}",
            self.nodes
                .iter()
                .enumerate()
                .map(|(i, n)| format!("{i}: {:?}", n.property))
                .join(", ")
        )?;
        write!(
            f,
            "edges: {}",
            self.edges
                .iter()
                .map(|e| format!("{} -{:?}-> {}", e.source, e.property, e.target))
                .join(", ")
        )
    }
}
