//! Unrooted (equal-angle) layout
//!
//! Felsenstein's equal-angle algorithm: each node receives an angular sector
//! proportional to the number of tips below it, children split their parent's
//! sector in input order, and a node sits at its sector's bisector one branch
//! length away from its parent. Sibling subtrees therefore never overlap in
//! angular extent; edge crossings for pathological branch-length
//! distributions remain possible, which is a property of the algorithm.
//!
//! Sectors and angles are tracked in half-turn units (multiples of π), and
//! the projection uses sin for x and cos for y. Both conventions come from
//! the outputs this crate is coordinate-compatible with.

use anyhow::Result;
use std::f64::consts::PI;
use tracing::{debug, span, trace, Level};

use super::Edge;
use crate::core::{flatten, subtree_ids, Tree};

/// A flat row enriched with free 2D coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrootedNode {
    pub this_id: usize,
    pub parent_id: Option<usize>,
    pub parent_label: Option<String>,
    pub this_label: String,
    pub children: Vec<usize>,
    pub branch_length: f64,
    pub is_tip: bool,
    pub x: f64,
    pub y: f64,
    /// Bisector of this node's sector, in half-turn units.
    pub angle: f64,
}

/// Layout output: enriched rows plus one straight segment per edge.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrootedLayout {
    pub data: Vec<UnrootedNode>,
    pub edges: Vec<Edge>,
}

/// Per-node layout annotation, kept separate from the tree so repeated
/// layout calls see identical input.
#[derive(Debug, Clone, Copy, Default)]
struct Sector {
    start: f64,
    end: f64,
    angle: f64,
    x: f64,
    y: f64,
}

/// Compute the equal-angle layout for a tree.
pub fn unrooted(tree: &Tree) -> Result<UnrootedLayout> {
    let layout_span = span!(
        Level::INFO,
        "unrooted_layout",
        node_count = tree.node_count(),
        tip_count = tree.tip_count()
    );
    let _enter = layout_span.enter();

    trace!("Counting tips per subtree");
    let n = tree.node_count();
    let mut ntips = vec![0usize; n];
    for id in tree.postorder(tree.root()) {
        let node = &tree.nodes()[id];
        ntips[id] = if node.is_tip() {
            1
        } else {
            node.children.iter().map(|&c| ntips[c]).sum()
        };
    }

    trace!("Partitioning angular sectors");
    let mut sectors = vec![Sector::default(); n];
    // The root owns the full circle: [0, 2) half-turns.
    sectors[tree.root()] = Sector {
        start: 0.0,
        end: 2.0,
        angle: 0.0,
        x: 0.0,
        y: 0.0,
    };
    for id in tree.preorder(tree.root()) {
        let node = &tree.nodes()[id];
        let parent = sectors[id];
        let mut cursor = parent.start;
        for &child_id in &node.children {
            let child = &tree.nodes()[child_id];
            let arc = (parent.end - parent.start) * ntips[child_id] as f64 / ntips[id] as f64;
            let start = cursor;
            let end = start + arc;
            let angle = start + arc / 2.0;
            cursor = end;

            let length = child.branch_length.unwrap_or(0.0);
            sectors[child_id] = Sector {
                start,
                end,
                angle,
                x: parent.x + length * (angle * PI).sin(),
                y: parent.y + length * (angle * PI).cos(),
            };
        }
    }

    let data: Vec<UnrootedNode> = flatten(tree, true)
        .into_iter()
        .map(|row| {
            let s = sectors[row.this_id];
            UnrootedNode {
                this_id: row.this_id,
                parent_id: row.parent_id,
                parent_label: row.parent_label,
                this_label: row.this_label,
                children: row.children,
                branch_length: row.branch_length,
                is_tip: row.is_tip,
                x: s.x,
                y: s.y,
                angle: s.angle,
            }
        })
        .collect();

    // One straight segment per edge, to the parent's actual coordinates.
    let edges: Vec<Edge> = data
        .iter()
        .filter_map(|row| {
            let parent = row.parent_id?;
            let p = sectors[parent];
            Some(Edge {
                x1: row.x,
                y1: row.y,
                id1: row.this_id,
                x2: p.x,
                y2: p.y,
                id2: parent,
            })
        })
        .collect();

    debug!(edges = edges.len(), "Unrooted layout complete");

    Ok(UnrootedLayout { data, edges })
}

impl UnrootedLayout {
    /// Restrict the layout to `node_id` and its descendants.
    ///
    /// Returns an empty layout when `node_id` is absent. The extracted root
    /// keeps its original `parent_id`, which points outside the returned set.
    pub fn extract_subtree(&self, node_id: usize) -> Self {
        let keep = subtree_ids(
            self.data.iter().map(|r| (r.this_id, r.children.as_slice())),
            node_id,
        );
        Self {
            data: self
                .data
                .iter()
                .filter(|r| keep.contains(&r.this_id))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| keep.contains(&e.id1))
                .cloned()
                .collect(),
        }
    }
}
