//! Layout algorithms and their geometry output
//!
//! Three layouts are provided, all consuming the same flat-row substrate:
//!
//! - [`rectangular`]: cladogram with tips on integer slots and horizontal
//!   distance equal to cumulative branch length.
//! - [`radial`]: circular layout mapping cumulative branch length to radius
//!   and tip order to angle, with per-edge spokes and per-node arcs.
//! - [`unrooted`]: Felsenstein's equal-angle layout with free 2D coordinates.
//!
//! Output structures are plain coordinate records for an external renderer;
//! no drawing happens here.

pub mod angles;
pub mod radial;
pub mod rectangular;
pub mod unrooted;

pub use radial::{radial, AngleStrategy, ArcStyle, RadialConfig, RadialLayout, RadialNode};
pub use rectangular::{rectangular, RectNode, RectangularLayout};
pub use unrooted::{unrooted, UnrootedLayout, UnrootedNode};

/// An axis-aligned line segment in a rectangular layout.
///
/// `node_id` identifies the node the segment belongs to (the child for
/// horizontals and per-edge verticals, the parent node for shared stems) and
/// is the key subtree extraction filters on.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub parent_id: Option<usize>,
    pub node_id: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub is_tip: bool,
    pub label: String,
}

/// A radial line from the parent's circle out to the child's circle, drawn
/// at the child's angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Spoke {
    pub parent_id: usize,
    pub child_id: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub is_tip: bool,
}

/// Sweep direction for an arc, using the SVG flag convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    /// Increasing angle from start to end.
    #[default]
    CounterClockwise,
    /// Decreasing angle from start to end (wrapped blocks).
    Clockwise,
}

impl Sweep {
    /// Numeric flag for renderers: 0 = CCW, 1 = CW.
    pub fn flag(&self) -> u8 {
        match self {
            Sweep::CounterClockwise => 0,
            Sweep::Clockwise => 1,
        }
    }
}

/// A circular arc at `radius` around the origin, from `start` to `end`
/// radians in the direction given by `sweep`.
///
/// `node_id` is the node the arc belongs to: the internal parent for block
/// arcs, the child for half/wedge arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub parent_id: Option<usize>,
    pub node_id: usize,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub sweep: Sweep,
}

/// A straight edge between a node and its parent's actual coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub id1: usize,
    pub x2: f64,
    pub y2: f64,
    pub id2: usize,
}
