//! Tree builder: node ids plus parent → child edges in, validated [`Tree`] out.
//!
//! Input that is not exactly one rooted tree is rejected here, before any walk
//! runs. The walks have no way to degrade gracefully on forests or cycles.

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::Bfs;
use petgraph::Directed;
use std::collections::HashMap;

use super::{Tree, TreeNode};
use crate::error::{Error, Result};
use crate::graph::{Edge, NodeId};

/// Build a tree from a node collection and its parent → child edges.
///
/// Arena indices follow the order of `nodes`; each node's children follow
/// the order of `edges`. The edge slice is only read.
pub fn build_tree(nodes: &[NodeId], edges: &[Edge]) -> Result<Tree> {
    if nodes.is_empty() {
        return Err(Error::EmptyTree);
    }

    let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    let mut tree_nodes: Vec<TreeNode> = Vec::with_capacity(nodes.len());
    // Topology mirror used only for cycle detection and depth assignment.
    // Node weights are arena indices.
    let mut graph: StableGraph<usize, (), Directed> =
        StableGraph::with_capacity(nodes.len(), edges.len());
    let mut graph_index: Vec<NodeIndex> = Vec::with_capacity(nodes.len());

    for (slot, &id) in nodes.iter().enumerate() {
        if index.insert(id, slot).is_some() {
            return Err(Error::DuplicateNode { id });
        }
        tree_nodes.push(TreeNode::new(id, slot));
        graph_index.push(graph.add_node(slot));
    }

    for edge in edges {
        let lookup = |missing: NodeId| {
            index.get(&missing).copied().ok_or(Error::UnknownNode {
                parent: edge.source,
                child: edge.target,
                missing,
            })
        };
        let parent = lookup(edge.source)?;
        let child = lookup(edge.target)?;

        if parent == child {
            return Err(Error::Cycle { node: edge.source });
        }
        if let Some(existing) = tree_nodes[child].parent {
            return Err(Error::MultipleParents {
                child: edge.target,
                first: tree_nodes[existing].id,
                second: edge.source,
            });
        }

        let number = tree_nodes[parent].children.len();
        tree_nodes[parent].children.push(child);
        tree_nodes[child].parent = Some(parent);
        tree_nodes[child].number = number;
        graph.add_edge(graph_index[parent], graph_index[child], ());
    }

    let roots: Vec<usize> = tree_nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.parent.is_none())
        .map(|(slot, _)| slot)
        .collect();

    let root = match roots.as_slice() {
        [] => return Err(Error::NoRoot),
        [root] => *root,
        _ => {
            return Err(Error::MultipleRoots {
                roots: roots.iter().map(|&slot| tree_nodes[slot].id).collect(),
            });
        }
    };

    // With a single root and one parent per node, anything unreachable from
    // the root sits on a cycle.
    if let Err(cycle) = toposort(&graph, None) {
        let slot = graph[cycle.node_id()];
        return Err(Error::Cycle {
            node: tree_nodes[slot].id,
        });
    }

    // Parents are dequeued before their children, so depth is final when read.
    let mut bfs = Bfs::new(&graph, graph_index[root]);
    while let Some(next) = bfs.next(&graph) {
        let slot = graph[next];
        if let Some(parent) = tree_nodes[slot].parent {
            tree_nodes[slot].depth = tree_nodes[parent].depth + 1;
        }
    }

    tracing::debug!(
        nodes = tree_nodes.len(),
        edges = edges.len(),
        root = %tree_nodes[root].id,
        "built layout tree"
    );

    Ok(Tree::from_parts(tree_nodes, root, index))
}
