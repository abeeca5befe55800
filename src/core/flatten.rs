//! Flat row representation of a tree ("fortify")
//!
//! Converts the arena tree into one row per node, annotated with parent and
//! child id references. This is the common substrate every layout consumes,
//! akin to the edge slots of an R `phylo` object.

use crate::core::tree::{NodeId, Tree};
use std::collections::{HashMap, HashSet};

/// One row per tree node.
///
/// Rows are value objects: layouts copy them into their own node records and
/// never mutate them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    /// Id of this node (matches the arena index).
    pub this_id: usize,
    /// Id of the parent node (None for the root).
    pub parent_id: Option<usize>,
    /// Label of the parent node (None for the root).
    pub parent_label: Option<String>,
    /// Label of this node (empty when the input carried none).
    pub this_label: String,
    /// Ids of the children, in input order.
    pub children: Vec<usize>,
    /// Branch length to the parent; the root is forced to 0 and missing
    /// lengths collapse to 0.
    pub branch_length: f64,
    /// True iff this node has zero children.
    pub is_tip: bool,
}

/// Convert a tree into flat rows via pre-order traversal.
///
/// When `sort` is true the final array is re-ordered by ascending `this_id`.
/// Ids are assigned in post-order, so the sorted order is not the traversal
/// order; algorithms that depend on pre-order tip order walk the tree itself.
pub fn flatten(tree: &Tree, sort: bool) -> Vec<FlatRow> {
    let mut rows: Vec<FlatRow> = tree
        .preorder(tree.root())
        .into_iter()
        .map(|id| {
            let node = &tree.nodes()[id];
            let parent = node.parent.and_then(|p| tree.node(p));
            FlatRow {
                this_id: node.id,
                parent_id: parent.map(|p| p.id),
                parent_label: parent.map(|p| p.label.clone()),
                this_label: node.label.clone(),
                children: node.children.clone(),
                branch_length: if node.is_root() {
                    0.0
                } else {
                    node.branch_length.unwrap_or(0.0)
                },
                is_tip: node.is_tip(),
            }
        })
        .collect();

    if sort {
        rows.sort_by_key(|r| r.this_id);
    }
    rows
}

/// Build an id -> position index for a row slice.
pub fn row_index(rows: &[FlatRow]) -> HashMap<usize, usize> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| (r.this_id, i))
        .collect()
}

/// Collect the id set of `node_id` and all of its descendants.
///
/// `rows` is any iterator of `(id, children)` pairs; an absent `node_id`
/// yields an empty set.
pub fn subtree_ids<'a, I>(rows: I, node_id: usize) -> HashSet<usize>
where
    I: IntoIterator<Item = (usize, &'a [usize])>,
{
    let children: HashMap<usize, &[usize]> = rows.into_iter().collect();
    let mut keep = HashSet::new();
    if !children.contains_key(&node_id) {
        return keep;
    }
    let mut stack = vec![node_id];
    while let Some(id) = stack.pop() {
        if let Some(kids) = children.get(&id) {
            if keep.insert(id) {
                stack.extend(kids.iter().copied());
            }
        }
    }
    keep
}

/// Ids on the path from `node_id` up to the root, inclusive.
///
/// Returns an empty path when `node_id` is not present in `rows`.
pub fn path_to_root(rows: &[FlatRow], node_id: usize) -> Vec<usize> {
    let index = row_index(rows);
    let mut path = Vec::new();
    let mut cursor = Some(node_id);
    while let Some(id) = cursor {
        let Some(&pos) = index.get(&id) else { break };
        path.push(id);
        cursor = rows[pos].parent_id;
    }
    path
}

/// Convert a root-ward id path into (child, parent) edge pairs.
pub fn edges_on_path(path: &[usize]) -> Vec<(usize, usize)> {
    path.windows(2).map(|w| (w[0], w[1])).collect()
}
