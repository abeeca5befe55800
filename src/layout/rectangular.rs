//! Rectangular (cladogram) layout
//!
//! Tips are assigned 1-based vertical slots in depth-first input order,
//! internal nodes sit at the mean of their children's slots, and horizontal
//! position is cumulative branch length from the root. Each parent-child
//! edge renders as one horizontal line plus vertical connectors; both the
//! shared-stem and per-edge vertical presentations are emitted, since
//! downstream highlighting needs per-edge granularity.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::Segment;
use crate::core::{flatten, subtree_ids, Tree};

/// A flat row enriched with rectangular coordinates.
///
/// `y0 == y1`: a node's line is drawn at a single height. `x1 - x0` equals
/// the node's branch length (0 when absent).
#[derive(Debug, Clone, PartialEq)]
pub struct RectNode {
    pub this_id: usize,
    pub parent_id: Option<usize>,
    pub parent_label: Option<String>,
    pub this_label: String,
    pub children: Vec<usize>,
    pub branch_length: f64,
    pub is_tip: bool,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Layout output: enriched rows plus derived line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularLayout {
    pub data: Vec<RectNode>,
    /// One line per non-root node, spanning `(x0, y)` to `(x1, y)`.
    pub horizontal_lines: Vec<Segment>,
    /// One shared stem per parent with children, spanning min to max child y
    /// at the parent's junction x.
    pub vertical_lines: Vec<Segment>,
    /// One vertical per edge from the child's height to the parent's height
    /// at the junction x; the per-edge alternative to the shared stems.
    pub child_verticals: Vec<Segment>,
}

/// Compute the rectangular layout for a tree.
pub fn rectangular(tree: &Tree) -> Result<RectangularLayout> {
    let layout_span = span!(
        Level::INFO,
        "rectangular_layout",
        node_count = tree.node_count(),
        tip_count = tree.tip_count()
    );
    let _enter = layout_span.enter();

    trace!("Assigning vertical slots");
    let n = tree.node_count();
    let mut y = vec![0.0f64; n];
    for (slot, tip) in tree.tips_preorder().into_iter().enumerate() {
        y[tip] = (slot + 1) as f64;
    }
    for id in tree.postorder(tree.root()) {
        let children = &tree.nodes()[id].children;
        if !children.is_empty() {
            y[id] = children.iter().map(|&c| y[c]).sum::<f64>() / children.len() as f64;
        }
    }

    trace!("Assigning cumulative branch lengths");
    let mut x0 = vec![0.0f64; n];
    let mut x1 = vec![0.0f64; n];
    for id in tree.preorder(tree.root()) {
        let node = &tree.nodes()[id];
        if let Some(parent) = node.parent {
            x0[id] = x1[parent];
            x1[id] = x0[id] + node.branch_length.unwrap_or(0.0);
        }
    }

    let data: Vec<RectNode> = flatten(tree, true)
        .into_iter()
        .map(|row| {
            let id = row.this_id;
            RectNode {
                this_id: row.this_id,
                parent_id: row.parent_id,
                parent_label: row.parent_label,
                this_label: row.this_label,
                children: row.children,
                branch_length: row.branch_length,
                is_tip: row.is_tip,
                x0: x0[id],
                x1: x1[id],
                y0: y[id],
                y1: y[id],
            }
        })
        .collect();

    let horizontal_lines: Vec<Segment> = data
        .iter()
        .filter(|row| row.parent_id.is_some())
        .map(|row| Segment {
            parent_id: row.parent_id,
            node_id: row.this_id,
            x0: row.x0,
            x1: row.x1,
            y0: row.y0,
            y1: row.y0,
            is_tip: row.is_tip,
            label: row.this_label.clone(),
        })
        .collect();

    let vertical_lines: Vec<Segment> = data
        .iter()
        .filter(|row| !row.children.is_empty())
        .map(|row| {
            let child_ys: Vec<f64> = row.children.iter().map(|&c| y[c]).collect();
            let y_min = child_ys.iter().cloned().fold(f64::INFINITY, f64::min);
            let y_max = child_ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            Segment {
                parent_id: row.parent_id,
                node_id: row.this_id,
                x0: row.x1,
                x1: row.x1,
                y0: y_min,
                y1: y_max,
                is_tip: false,
                label: row.this_label.clone(),
            }
        })
        .collect();

    let child_verticals: Vec<Segment> = data
        .iter()
        .filter_map(|row| {
            let parent = row.parent_id?;
            let (yc, yp) = (row.y0, y[parent]);
            Some(Segment {
                parent_id: row.parent_id,
                node_id: row.this_id,
                x0: row.x0,
                x1: row.x0,
                y0: yc.min(yp),
                y1: yc.max(yp),
                is_tip: row.is_tip,
                label: row.this_label.clone(),
            })
        })
        .collect();

    debug!(
        horizontals = horizontal_lines.len(),
        verticals = vertical_lines.len(),
        "Rectangular layout complete"
    );

    Ok(RectangularLayout {
        data,
        horizontal_lines,
        vertical_lines,
        child_verticals,
    })
}

impl RectangularLayout {
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
            horizontal_lines: self
                .horizontal_lines
                .iter()
                .filter(|s| keep.contains(&s.node_id))
                .cloned()
                .collect(),
            vertical_lines: self
                .vertical_lines
                .iter()
                .filter(|s| keep.contains(&s.node_id))
                .cloned()
                .collect(),
            child_verticals: self
                .child_verticals
                .iter()
                .filter(|s| keep.contains(&s.node_id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse;

    #[test]
    fn test_branch_length_spans() {
        let tree = parse("(A:1,(B:2,C:3):4);").unwrap();
        let layout = rectangular(&tree).unwrap();
        for row in &layout.data {
            assert!((row.x1 - row.x0 - row.branch_length).abs() < 1e-12);
        }
        let root = layout.data.iter().find(|r| r.parent_id.is_none()).unwrap();
        assert_eq!(root.x0, 0.0);
        assert_eq!(root.x1, 0.0);
    }

    #[test]
    fn test_tip_slots_are_permutation() {
        let tree = parse("((A,B),(C,(D,E)));").unwrap();
        let layout = rectangular(&tree).unwrap();
        let mut slots: Vec<f64> = layout
            .data
            .iter()
            .filter(|r| r.is_tip)
            .map(|r| r.y0)
            .collect();
        slots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(slots, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_internal_y_is_mean_of_children() {
        let tree = parse("(A,B);").unwrap();
        let layout = rectangular(&tree).unwrap();
        let root = layout.data.iter().find(|r| r.parent_id.is_none()).unwrap();
        assert_eq!(root.y0, 1.5);
    }

    #[test]
    fn test_multifurcation_mean_and_stem_span() {
        let tree = parse("(A,B,C);").unwrap();
        let layout = rectangular(&tree).unwrap();
        let root = layout.data.iter().find(|r| r.parent_id.is_none()).unwrap();
        assert_eq!(root.y0, 2.0);

        assert_eq!(layout.vertical_lines.len(), 1);
        let stem = &layout.vertical_lines[0];
        assert_eq!(stem.y0, 1.0);
        assert_eq!(stem.y1, 3.0);
    }

    #[test]
    fn test_single_node_tree_has_no_lines() {
        let tree = parse("A;").unwrap();
        let layout = rectangular(&tree).unwrap();
        assert_eq!(layout.data.len(), 1);
        assert!(layout.horizontal_lines.is_empty());
        assert!(layout.vertical_lines.is_empty());
        assert!(layout.child_verticals.is_empty());
    }

    #[test]
    fn test_one_vertical_per_edge() {
        let tree = parse("(A:1,(B:2,C:3):4);").unwrap();
        let layout = rectangular(&tree).unwrap();
        // Every non-root node gets exactly one horizontal and one child vertical.
        assert_eq!(layout.horizontal_lines.len(), 4);
        assert_eq!(layout.child_verticals.len(), 4);
        // Child verticals sit at the parent's junction x.
        for seg in &layout.child_verticals {
            let parent = layout
                .data
                .iter()
                .find(|r| seg.parent_id == Some(r.this_id))
                .unwrap();
            assert!((seg.x0 - parent.x1).abs() < 1e-12);
        }
    }
}
