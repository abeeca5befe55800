//! Rooted tree data structure and traversals
//!
//! Nodes live in a flat arena (`Vec<Node>`) and reference each other by
//! `NodeId` index, so parent back-references carry no ownership. The Newick
//! parser builds trees in post-order, which means the arena index of a node
//! doubles as its id and the root always holds the highest id.

use crate::core::error::PhyloError;
use std::collections::VecDeque;

/// Index into the tree's node arena.
pub type NodeId = usize;

/// A single node in a rooted tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of this node in the arena.
    pub id: NodeId,
    /// Parent node (None for the root).
    pub parent: Option<NodeId>,
    /// Child nodes, in input order.
    pub children: Vec<NodeId>,
    /// Node label (empty when the input carried none).
    pub label: String,
    /// Branch length from this node to its parent.
    pub branch_length: Option<f64>,
}

impl Node {
    /// True if this node has no children.
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    /// True if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A rooted tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree from pre-built nodes and a root index.
    ///
    /// Used by the Newick parser; the node list must be non-empty and every
    /// id must equal its arena index.
    pub fn from_nodes(nodes: Vec<Node>, root: NodeId) -> Result<Self, PhyloError> {
        if nodes.is_empty() {
            return Err(PhyloError::parse_error("empty node list"));
        }
        if root >= nodes.len() {
            return Err(PhyloError::parse_error(format!(
                "root index {} out of range ({})",
                root,
                nodes.len()
            )));
        }
        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in arena (id) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Pre-order traversal from `start`: a node before its subtrees, children
    /// in input order.
    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut stack = vec![start];
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = stack.pop() {
            order.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Post-order traversal from `start`: children (in input order) before
    /// their parent.
    pub fn postorder(&self, start: NodeId) -> Vec<NodeId> {
        // Right-to-left preorder, reversed, is left-to-right postorder.
        let mut stack = vec![start];
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().copied());
        }
        order.reverse();
        order
    }

    /// Level-order (breadth-first) traversal from `start`.
    pub fn levelorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.nodes[id].children.iter().copied());
        }
        order
    }

    /// Number of tips descending from `id` (a tip counts itself).
    pub fn num_tips(&self, id: NodeId) -> usize {
        self.levelorder(id)
            .into_iter()
            .filter(|&n| self.nodes[n].is_tip())
            .count()
    }

    /// Total number of tips in the tree.
    pub fn tip_count(&self) -> usize {
        self.num_tips(self.root)
    }

    /// Tip ids in depth-first left-to-right order.
    ///
    /// This is the order layouts use to assign tip slots and angles, so
    /// caller-provided sibling order (e.g. ladderized input) is preserved.
    pub fn tips_preorder(&self) -> Vec<NodeId> {
        self.preorder(self.root)
            .into_iter()
            .filter(|&n| self.nodes[n].is_tip())
            .collect()
    }
}
