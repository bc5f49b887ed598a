//! A generic engine that rebuilds the structure of a source graph in a destination graph.
//!
//! The engine is split in two. [`GraphCopy`] supplies the primitives for copying a single node
//! or edge, translating properties with caller supplied functions and recording which source
//! node was copied to which destination node. A [`CopyMethod`] decides in which order nodes are
//! visited: [`Plain`] enumerates the whole source, [`Bfs`] and [`Dfs`] explore it from a set of
//! start nodes and copy nodes lazily as they are discovered.
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    graph::{IndefiniteGraph, MutableGraph, UniversalGraph},
    math::{HashMapping, Mapping, MappingError, MutableMapping},
    prelude::AutomatonError,
};

mod traversal;
pub use traversal::{Bfs, Dfs, Plain};

mod automaton;
pub use automaton::{copy_automaton, Traversal};

/// Errors that can occur while copying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// An edge was copied before the node it leads to. The node is kept in its `Debug`
    /// rendering so that one error type serves graphs of any node type.
    #[error("node {0} has not been copied")]
    Unmapped(String),
    /// The destination refused to grow.
    #[error("destination rejected the copy: {0}")]
    Destination(#[from] AutomatonError),
    /// The node mapping could not be updated.
    #[error("node mapping rejected the copy: {0}")]
    Mapping(#[from] MappingError),
}

/// Holds everything a single copy run needs: the source graph, the destination graph, the two
/// property translations and the node mapping that is built up along the way.
///
/// The mapping only ever grows during a run. Copying the same source node twice is possible,
/// but it creates two destination nodes and the second one replaces the first in the mapping.
pub struct GraphCopy<'a, G1: IndefiniteGraph, G2: MutableGraph, NF, EF> {
    in_graph: &'a G1,
    out_graph: &'a mut G2,
    node_mapping: HashMapping<G1::Node, G2::Node>,
    node_property: NF,
    edge_property: EF,
}

impl<'a, G1, G2, NF, EF> GraphCopy<'a, G1, G2, NF, EF>
where
    G1: IndefiniteGraph,
    G2: MutableGraph,
    NF: Fn(G1::Node) -> G2::NodeProperty,
    EF: Fn(G1::Edge) -> G2::EdgeProperty,
{
    /// Prepares copying `in_graph` into `out_graph`. Node properties of the destination are
    /// computed by `node_property`, edge properties by `edge_property`.
    pub fn new(in_graph: &'a G1, out_graph: &'a mut G2, node_property: NF, edge_property: EF) -> Self {
        Self {
            in_graph,
            out_graph,
            node_mapping: HashMapping::new(),
            node_property,
            edge_property,
        }
    }

    /// Returns the source graph.
    pub fn in_graph(&self) -> &'a G1 {
        self.in_graph
    }

    /// Returns the destination graph.
    pub fn out_graph(&mut self) -> &mut G2 {
        self.out_graph
    }

    /// Adds one destination node for `node` and records the correspondence.
    pub fn copy_node(&mut self, node: G1::Node) -> Result<G2::Node, CopyError> {
        let copied = self.out_graph.add_node((self.node_property)(node))?;
        if let Some(previous) = self.node_mapping.insert(node, copied)? {
            warn!("node {node:?} was copied again, {previous:?} is replaced by {copied:?}");
        }
        trace!("copied node {node:?} to {copied:?}");
        Ok(copied)
    }

    /// Copies `edge` so that it leaves `source`, which is a node of the destination. The target
    /// of `edge` must have been copied already, otherwise [`CopyError::Unmapped`] is returned
    /// and the destination is left untouched.
    pub fn copy_edge(&mut self, source: G2::Node, edge: G1::Edge) -> Result<G2::Edge, CopyError> {
        let target = self.in_graph.target(edge);
        self.copy_edge_to(source, edge, target)
    }

    /// Like [`GraphCopy::copy_edge`], but the source node the edge should lead to is given
    /// explicitly.
    pub fn copy_edge_to(
        &mut self,
        source: G2::Node,
        edge: G1::Edge,
        target: G1::Node,
    ) -> Result<G2::Edge, CopyError> {
        let copied_target = self
            .mapped(target)
            .ok_or_else(|| CopyError::Unmapped(format!("{target:?}")))?;
        self.connect(source, edge, copied_target)
    }

    /// Copies `edge` so that it leaves `source` and leads to the copy of `target`. If `target`
    /// has not been copied yet, it is copied first and its copy is returned. Otherwise the
    /// existing copy is reused and `None` is returned.
    pub fn copy_edge_checked(
        &mut self,
        source: G2::Node,
        edge: G1::Edge,
        target: G1::Node,
    ) -> Result<Option<G2::Node>, CopyError> {
        let (copied_target, fresh) = match self.mapped(target) {
            Some(copied) => (copied, None),
            None => {
                let copied = self.copy_node(target)?;
                (copied, Some(copied))
            }
        };
        self.connect(source, edge, copied_target)?;
        Ok(fresh)
    }

    /// Returns the copy of `node`, if it has been copied.
    pub fn mapped(&self, node: G1::Node) -> Option<G2::Node> {
        self.node_mapping.get(&node).copied()
    }

    /// Returns the correspondence between source and destination nodes built so far.
    pub fn node_mapping(&self) -> &HashMapping<G1::Node, G2::Node> {
        &self.node_mapping
    }

    /// Ends the run and hands out the node mapping.
    pub fn into_node_mapping(self) -> HashMapping<G1::Node, G2::Node> {
        self.node_mapping
    }

    fn connect(
        &mut self,
        source: G2::Node,
        edge: G1::Edge,
        copied_target: G2::Node,
    ) -> Result<G2::Edge, CopyError> {
        let copied = self
            .out_graph
            .connect(source, copied_target, (self.edge_property)(edge))?;
        trace!("copied edge {edge:?} to {copied:?}");
        Ok(copied)
    }
}

/// Decides in which order the nodes and edges of a source graph are copied. Implementations
/// only orchestrate the primitives of [`GraphCopy`].
pub trait CopyMethod<G1: IndefiniteGraph> {
    /// Runs the copy.
    fn do_copy<G2, NF, EF>(self, copy: &mut GraphCopy<'_, G1, G2, NF, EF>) -> Result<(), CopyError>
    where
        G2: MutableGraph,
        NF: Fn(G1::Node) -> G2::NodeProperty,
        EF: Fn(G1::Edge) -> G2::EdgeProperty;
}

/// Copies `in_graph` into `out_graph` in the order given by `method`, translating node and
/// edge properties with the given functions. Returns the node mapping.
///
/// # Errors
/// Fails with the first error raised by `method` or by the destination. Nodes and edges that
/// were added before the failure stay in `out_graph`, so a failed run can leave the
/// destination partly populated.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let mut source = SimpleGraph::new();
/// let a = source.add_node("A");
/// let b = source.add_node("B");
/// source.connect(a, b, "x");
///
/// let mut destination: SimpleGraph<String, usize> = SimpleGraph::new();
/// let mapping = copy_graph(
///     Plain,
///     &source,
///     &mut destination,
///     |n| source.node_property(n).to_lowercase(),
///     |e| source.edge_property(e).len(),
/// )
/// .unwrap();
/// assert_eq!(destination.node_count(), 2);
/// assert_eq!(destination.node_property(*mapping.get(&b).unwrap()), "b");
/// ```
pub fn copy_graph<G1, G2, C, NF, EF>(
    method: C,
    in_graph: &G1,
    out_graph: &mut G2,
    node_property: NF,
    edge_property: EF,
) -> Result<HashMapping<G1::Node, G2::Node>, CopyError>
where
    G1: IndefiniteGraph,
    G2: MutableGraph,
    C: CopyMethod<G1>,
    NF: Fn(G1::Node) -> G2::NodeProperty,
    EF: Fn(G1::Edge) -> G2::EdgeProperty,
{
    let mut copy = GraphCopy::new(in_graph, out_graph, node_property, edge_property);
    method.do_copy(&mut copy)?;
    debug!("copied {} nodes", copy.node_mapping().len());
    Ok(copy.into_node_mapping())
}

/// Copies a [`UniversalGraph`] into a destination that uses the same property types, keeping
/// every property as it is.
pub fn copy_universal_graph<G1, G2, C>(
    method: C,
    in_graph: &G1,
    out_graph: &mut G2,
) -> Result<HashMapping<G1::Node, G2::Node>, CopyError>
where
    G1: UniversalGraph,
    G2: MutableGraph<NodeProperty = G1::NodeProperty, EdgeProperty = G1::EdgeProperty>,
    C: CopyMethod<G1>,
{
    copy_graph(
        method,
        in_graph,
        out_graph,
        |n| in_graph.node_property(n),
        |e| in_graph.edge_property(e),
    )
}

/// Copies the part of `in_graph` that is reachable from `initial`, discovering nodes breadth
/// first, and returns the node mapping.
pub fn copy_reachable<G1, G2, NF, EF>(
    in_graph: &G1,
    initial: impl IntoIterator<Item = G1::Node>,
    out_graph: &mut G2,
    node_property: NF,
    edge_property: EF,
) -> Result<HashMapping<G1::Node, G2::Node>, CopyError>
where
    G1: IndefiniteGraph,
    G2: MutableGraph,
    NF: Fn(G1::Node) -> G2::NodeProperty,
    EF: Fn(G1::Edge) -> G2::EdgeProperty,
{
    copy_graph(
        Bfs::new(initial),
        in_graph,
        out_graph,
        node_property,
        edge_property,
    )
}
