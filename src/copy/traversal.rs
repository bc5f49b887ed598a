use std::collections::VecDeque;

use super::{CopyError, CopyMethod, GraphCopy};
use crate::graph::{Graph, IndefiniteGraph, MutableGraph};

/// Copies every node of the source first and then every edge, so each edge can rely on its
/// target having been copied already.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl<G1: Graph> CopyMethod<G1> for Plain {
    fn do_copy<G2, NF, EF>(self, copy: &mut GraphCopy<'_, G1, G2, NF, EF>) -> Result<(), CopyError>
    where
        G2: MutableGraph,
        NF: Fn(G1::Node) -> G2::NodeProperty,
        EF: Fn(G1::Edge) -> G2::EdgeProperty,
    {
        let in_graph = copy.in_graph();
        for node in in_graph.nodes() {
            copy.copy_node(node)?;
        }
        for node in in_graph.nodes() {
            let source = copy
                .mapped(node)
                .ok_or_else(|| CopyError::Unmapped(format!("{node:?}")))?;
            for edge in in_graph.outgoing_edges(node) {
                copy.copy_edge(source, edge)?;
            }
        }
        Ok(())
    }
}

/// Copies the part of the source that is reachable from the given start nodes, in breadth
/// first order. Nodes are copied when they are first discovered through an edge.
#[derive(Debug, Clone)]
pub struct Bfs<N> {
    initial: Vec<N>,
}

impl<N> Bfs<N> {
    /// Starts the exploration from `initial`.
    pub fn new<I: IntoIterator<Item = N>>(initial: I) -> Self {
        Self {
            initial: initial.into_iter().collect(),
        }
    }
}

impl<G1: IndefiniteGraph> CopyMethod<G1> for Bfs<G1::Node> {
    fn do_copy<G2, NF, EF>(self, copy: &mut GraphCopy<'_, G1, G2, NF, EF>) -> Result<(), CopyError>
    where
        G2: MutableGraph,
        NF: Fn(G1::Node) -> G2::NodeProperty,
        EF: Fn(G1::Edge) -> G2::EdgeProperty,
    {
        let in_graph = copy.in_graph();
        let mut queue = VecDeque::new();
        for node in self.initial {
            if copy.mapped(node).is_none() {
                queue.push_back((node, copy.copy_node(node)?));
            }
        }

        while let Some((node, copied)) = queue.pop_front() {
            for edge in in_graph.outgoing_edges(node) {
                let target = in_graph.target(edge);
                if let Some(fresh) = copy.copy_edge_checked(copied, edge, target)? {
                    queue.push_back((target, fresh));
                }
            }
        }
        Ok(())
    }
}

/// Like [`Bfs`], but explores depth first. Each start node is exhausted before the next one
/// is considered.
#[derive(Debug, Clone)]
pub struct Dfs<N> {
    initial: Vec<N>,
}

impl<N> Dfs<N> {
    /// Starts the exploration from `initial`.
    pub fn new<I: IntoIterator<Item = N>>(initial: I) -> Self {
        Self {
            initial: initial.into_iter().collect(),
        }
    }
}

impl<G1: IndefiniteGraph> CopyMethod<G1> for Dfs<G1::Node> {
    fn do_copy<G2, NF, EF>(self, copy: &mut GraphCopy<'_, G1, G2, NF, EF>) -> Result<(), CopyError>
    where
        G2: MutableGraph,
        NF: Fn(G1::Node) -> G2::NodeProperty,
        EF: Fn(G1::Edge) -> G2::EdgeProperty,
    {
        let in_graph = copy.in_graph();
        for root in self.initial {
            if copy.mapped(root).is_some() {
                continue;
            }
            let copied = copy.copy_node(root)?;
            let mut stack = vec![(copied, in_graph.outgoing_edges(root))];
            while let Some((source, edges)) = stack.last_mut() {
                let source = *source;
                match edges.next() {
                    Some(edge) => {
                        let target = in_graph.target(edge);
                        if let Some(fresh) = copy.copy_edge_checked(source, edge, target)? {
                            stack.push((fresh, in_graph.outgoing_edges(target)));
                        }
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    /// A binary tree of depth two below node 0, numbered in breadth first order.
    fn tree() -> SimpleGraph<usize, ()> {
        let mut graph = SimpleGraph::new();
        for i in 0..7 {
            graph.add_node(i);
        }
        for (parent, child) in [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)] {
            graph.connect(parent, child, ());
        }
        graph
    }

    fn copied_order(destination: &SimpleGraph<usize, ()>) -> Vec<usize> {
        destination
            .nodes()
            .map(|n| destination.node_property(n))
            .collect_vec()
    }

    #[test]
    fn bfs_discovers_level_by_level() {
        let source = tree();
        let mut destination = SimpleGraph::new();
        copy_universal_graph(Bfs::new([0]), &source, &mut destination).unwrap();
        assert_eq!(copied_order(&destination), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn dfs_discovers_branch_by_branch() {
        let source = tree();
        let mut destination = SimpleGraph::new();
        copy_universal_graph(Dfs::new([0]), &source, &mut destination).unwrap();
        assert_eq!(copied_order(&destination), vec![0, 1, 3, 4, 2, 5, 6]);
        assert_eq!(destination.edge_count(), 6);
    }

    #[test]
    fn duplicate_start_nodes_are_copied_once() {
        let source = tree();
        let mut destination = SimpleGraph::new();
        let mapping =
            copy_universal_graph(Bfs::new([2, 2, 5]), &source, &mut destination).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(copied_order(&destination), vec![2, 5, 6]);
    }
}
