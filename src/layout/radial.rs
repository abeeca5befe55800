//! Radial (circular) layout
//!
//! Maps cumulative branch length to radius and tip order to angle. Two angle
//! strategies are supported: evenly spaced tips with circular-mean internal
//! angles, and an APE-style "fan" with an open sector and arithmetic-mean
//! internal angles. Each edge renders as a spoke from the parent's circle to
//! the child's circle; internal nodes additionally get connecting arcs in
//! one of two styles.

use anyhow::Result;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, span, trace, Level};

use super::angles::{circular_mean, midpoint_ccw, normalize, unwrap_around, SPAN_EPSILON};
use super::{Arc, Spoke, Sweep};
use crate::core::{flatten, subtree_ids, Tree};

/// How internal node angles are derived from tip angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleStrategy {
    /// Tips evenly spaced over the full circle; internal angles are the
    /// circular mean of child angles.
    #[default]
    CircularMean,
    /// Tips evenly spaced over an open sector with optional rotation;
    /// internal angles are the arithmetic mean of unwrapped child angles.
    Fan,
}

impl fmt::Display for AngleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleStrategy::CircularMean => write!(f, "circular-mean"),
            AngleStrategy::Fan => write!(f, "fan"),
        }
    }
}

impl FromStr for AngleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circular-mean" | "circularmean" => Ok(AngleStrategy::CircularMean),
            "fan" => Ok(AngleStrategy::Fan),
            _ => Err(format!("Unknown angle strategy: {}", s)),
        }
    }
}

/// How arcs connecting an internal node's children are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcStyle {
    /// One arc per internal node covering the geometrically shorter span
    /// over its children's angles.
    #[default]
    ShortestSpan,
    /// One arc per internal node from its first child's angle to its last
    /// child's angle in input order, preserving visual tip order.
    FanBlock,
}

impl fmt::Display for ArcStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcStyle::ShortestSpan => write!(f, "shortest-span"),
            ArcStyle::FanBlock => write!(f, "fan-block"),
        }
    }
}

impl FromStr for ArcStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shortest-span" | "shortestspan" => Ok(ArcStyle::ShortestSpan),
            "fan-block" | "fanblock" => Ok(ArcStyle::FanBlock),
            _ => Err(format!("Unknown arc style: {}", s)),
        }
    }
}

/// Radial layout configuration.
#[derive(Debug, Clone)]
pub struct RadialConfig {
    pub angle_strategy: AngleStrategy,
    pub arcs_style: ArcStyle,
    /// Unfilled sector in degrees (fan strategy only), so the tree does not
    /// wrap onto itself.
    pub open_angle_deg: f64,
    /// Rotation of the first tip in degrees (fan strategy only).
    pub rotate_deg: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            angle_strategy: AngleStrategy::CircularMean,
            arcs_style: ArcStyle::ShortestSpan,
            open_angle_deg: 0.0,
            rotate_deg: 0.0,
        }
    }
}

/// A flat row enriched with polar and Cartesian coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialNode {
    pub this_id: usize,
    pub parent_id: Option<usize>,
    pub parent_label: Option<String>,
    pub this_label: String,
    pub children: Vec<usize>,
    pub branch_length: f64,
    pub is_tip: bool,
    /// Angle in radians, normalized to `[0, 2π)`.
    pub angle: f64,
    /// Cumulative branch length from the root.
    pub r: f64,
    pub x: f64,
    pub y: f64,
}

/// Layout output: enriched rows plus spokes and arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    pub data: Vec<RadialNode>,
    /// One spoke per non-root node, from the parent's circle to the child's
    /// circle at the child's angle.
    pub radii: Vec<Spoke>,
    /// One arc per internal node with at least two children.
    pub arcs: Vec<Arc>,
    /// One half-arc (or wedge, in fan style) per edge, for highlighting a
    /// single root-to-tip path.
    pub child_arcs: Vec<Arc>,
}

/// Compute the radial layout for a tree.
pub fn radial(tree: &Tree, config: &RadialConfig) -> Result<RadialLayout> {
    let layout_span = span!(
        Level::INFO,
        "radial_layout",
        node_count = tree.node_count(),
        tip_count = tree.tip_count(),
        angle_strategy = %config.angle_strategy,
        arcs_style = %config.arcs_style
    );
    let _enter = layout_span.enter();

    let n = tree.node_count();
    let angle = match config.angle_strategy {
        AngleStrategy::CircularMean => circular_mean_angles(tree),
        AngleStrategy::Fan => fan_angles(tree, config.open_angle_deg, config.rotate_deg),
    };

    trace!("Assigning cumulative radii");
    let mut r = vec![0.0f64; n];
    for id in tree.preorder(tree.root()) {
        let node = &tree.nodes()[id];
        if let Some(parent) = node.parent {
            r[id] = r[parent] + node.branch_length.unwrap_or(0.0);
        }
    }

    let data: Vec<RadialNode> = flatten(tree, true)
        .into_iter()
        .map(|row| {
            let id = row.this_id;
            RadialNode {
                this_id: row.this_id,
                parent_id: row.parent_id,
                parent_label: row.parent_label,
                this_label: row.this_label,
                children: row.children,
                branch_length: row.branch_length,
                is_tip: row.is_tip,
                angle: angle[id],
                r: r[id],
                x: r[id] * angle[id].cos(),
                y: r[id] * angle[id].sin(),
            }
        })
        .collect();

    let radii: Vec<Spoke> = data
        .iter()
        .filter_map(|row| {
            let parent = row.parent_id?;
            let theta = row.angle;
            Some(Spoke {
                parent_id: parent,
                child_id: row.this_id,
                x0: r[parent] * theta.cos(),
                y0: r[parent] * theta.sin(),
                x1: row.r * theta.cos(),
                y1: row.r * theta.sin(),
                is_tip: row.is_tip,
            })
        })
        .collect();

    let arcs = match config.arcs_style {
        ArcStyle::ShortestSpan => shortest_span_arcs(&data, &angle),
        ArcStyle::FanBlock => fan_block_arcs(&data, &angle),
    };
    let child_arcs = match config.arcs_style {
        ArcStyle::ShortestSpan => child_half_arcs(&data, &angle),
        ArcStyle::FanBlock => child_fan_wedges(&data, &angle),
    };

    debug!(
        spokes = radii.len(),
        arcs = arcs.len(),
        child_arcs = child_arcs.len(),
        "Radial layout complete"
    );

    Ok(RadialLayout {
        data,
        radii,
        arcs,
        child_arcs,
    })
}

/// Tip angles evenly spaced over the full circle in DFS order; internal
/// angles are the circular mean of child angles, bottom-up.
fn circular_mean_angles(tree: &Tree) -> Vec<f64> {
    let mut angle = vec![0.0f64; tree.node_count()];
    let tips = tree.tips_preorder();
    let tip_count = tips.len().max(1) as f64;
    for (i, tip) in tips.into_iter().enumerate() {
        angle[tip] = TAU * i as f64 / tip_count;
    }
    for id in tree.postorder(tree.root()) {
        let children = &tree.nodes()[id].children;
        if !children.is_empty() {
            angle[id] = circular_mean(children.iter().map(|&c| angle[c]));
        }
    }
    angle
}

/// Tip angles evenly spaced over an open sector; internal angles are the
/// arithmetic mean of child angles unwrapped around the first child, so
/// children straddling the 0/2π boundary average into the correct branch.
fn fan_angles(tree: &Tree, open_angle_deg: f64, rotate_deg: f64) -> Vec<f64> {
    let gap = open_angle_deg.to_radians();
    let rotate = rotate_deg.to_radians();

    let mut angle = vec![0.0f64; tree.node_count()];
    let tips = tree.tips_preorder();
    let tip_count = tips.len().max(1) as f64;
    // No last-step overlap: N tips cover 2π(1 - 1/N) minus the gap.
    let max_angle = TAU * (1.0 - 1.0 / tip_count) - gap;
    let step = if tips.len() > 1 {
        max_angle / (tip_count - 1.0)
    } else {
        0.0
    };
    for (i, tip) in tips.into_iter().enumerate() {
        angle[tip] = normalize(i as f64 * step + rotate);
    }

    for id in tree.postorder(tree.root()) {
        let children = &tree.nodes()[id].children;
        if !children.is_empty() {
            let first = angle[children[0]];
            let sum: f64 = children
                .iter()
                .map(|&c| unwrap_around(first, angle[c]))
                .sum();
            angle[id] = normalize(sum / children.len() as f64);
        }
    }
    angle
}

/// One arc per internal node over the geometrically shorter span of its
/// children's angles, at the node's own radius. Degenerate arcs (tiny span
/// or zero radius) are dropped.
fn shortest_span_arcs(data: &[RadialNode], angle: &[f64]) -> Vec<Arc> {
    let mut arcs = Vec::new();
    for row in data {
        if row.children.len() < 2 || row.r <= 0.0 {
            continue;
        }
        let child_angles: Vec<f64> = row.children.iter().map(|&c| normalize(angle[c])).collect();
        let a_min = child_angles.iter().cloned().fold(f64::INFINITY, f64::min);
        let a_max = child_angles
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let direct = a_max - a_min;
        let wrapped = TAU - direct;
        if direct.min(wrapped) < SPAN_EPSILON {
            continue;
        }
        // Always CCW: either min to max directly, or max through 0 to min.
        let (start, end) = if direct <= wrapped {
            (a_min, a_max)
        } else {
            (a_max, a_min)
        };
        arcs.push(Arc {
            parent_id: row.parent_id,
            node_id: row.this_id,
            radius: row.r,
            start,
            end,
            sweep: Sweep::CounterClockwise,
        });
    }
    arcs
}

/// One arc per internal node from its first to its last child's angle in
/// input order, matching traversal order rather than the shorter span.
fn fan_block_arcs(data: &[RadialNode], angle: &[f64]) -> Vec<Arc> {
    let mut arcs = Vec::new();
    for row in data {
        if row.children.len() < 2 || row.r <= 0.0 {
            continue;
        }
        let start = angle[row.children[0]];
        let end = angle[row.children[row.children.len() - 1]];
        let sweep = if end >= start {
            Sweep::CounterClockwise
        } else {
            Sweep::Clockwise
        };
        arcs.push(Arc {
            parent_id: row.parent_id,
            node_id: row.this_id,
            radius: row.r,
            start,
            end,
            sweep,
        });
    }
    arcs
}

/// One half-arc per edge at the parent's radius, from the parent's angle to
/// the child's angle.
fn child_half_arcs(data: &[RadialNode], angle: &[f64]) -> Vec<Arc> {
    // data is sorted by id and ids are contiguous, so data[id] is the row.
    data.iter()
        .filter_map(|row| {
            let parent = row.parent_id?;
            Some(Arc {
                parent_id: Some(parent),
                node_id: row.this_id,
                radius: data[parent].r,
                start: angle[parent],
                end: row.angle,
                sweep: Sweep::CounterClockwise,
            })
        })
        .collect()
}

/// One wedge per child at the parent's radius, bounded by the CCW midpoints
/// to the child's angular neighbors.
fn child_fan_wedges(data: &[RadialNode], angle: &[f64]) -> Vec<Arc> {
    let mut wedges = Vec::new();
    for row in data {
        if row.children.len() < 2 {
            continue;
        }
        let mut kids: Vec<(usize, f64)> = row
            .children
            .iter()
            .map(|&c| (c, normalize(angle[c])))
            .collect();
        kids.sort_by(|a, b| a.1.total_cmp(&b.1));

        let len = kids.len();
        for i in 0..len {
            let prev = kids[(i + len - 1) % len].1;
            let (child, current) = kids[i];
            let next = kids[(i + 1) % len].1;
            wedges.push(Arc {
                parent_id: Some(row.this_id),
                node_id: child,
                radius: row.r,
                start: midpoint_ccw(prev, current),
                end: midpoint_ccw(current, next),
                sweep: Sweep::CounterClockwise,
            });
        }
    }
    wedges
}

impl RadialLayout {
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
            radii: self
                .radii
                .iter()
                .filter(|s| keep.contains(&s.child_id))
                .cloned()
                .collect(),
            arcs: self
                .arcs
                .iter()
                .filter(|a| keep.contains(&a.node_id))
                .cloned()
                .collect(),
            child_arcs: self
                .child_arcs
                .iter()
                .filter(|a| keep.contains(&a.node_id))
                .cloned()
                .collect(),
        }
    }
}
