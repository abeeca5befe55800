//! Phyloplot - 2D and polar layouts for phylogenetic trees
//!
//! A library for parsing Newick tree strings and computing rectangular
//! (cladogram), radial (circular), and unrooted (equal-angle) layout
//! coordinates for an external renderer.
//!
//! # Quick Start
//!
//! ```rust
//! let layout = phyloplot::rectangular("(A:0.1,(B:0.2,C:0.3):0.4);").unwrap();
//! assert_eq!(layout.horizontal_lines.len(), 4);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, parse once and run layouts on the tree:
//!
//! ```rust
//! use phyloplot::prelude::*;
//!
//! let tree = phyloplot::parse("(A:1,(B:2,C:3):4);").unwrap();
//!
//! let rect = phyloplot::layout::rectangular(&tree).unwrap();
//! assert_eq!(rect.data.len(), 5);
//!
//! let config = RadialConfig {
//!     angle_strategy: AngleStrategy::Fan,
//!     arcs_style: ArcStyle::FanBlock,
//!     open_angle_deg: 20.0,
//!     rotate_deg: 90.0,
//! };
//! let circle = phyloplot::layout::radial(&tree, &config).unwrap();
//! assert_eq!(circle.radii.len(), 4);
//!
//! // Highlight a clade by extracting its induced subtree.
//! let clade = circle.extract_subtree(3);
//! assert!(clade.data.len() < circle.data.len());
//! ```

pub mod core;
pub mod layout;
pub mod newick;

pub use core::*;

use anyhow::Result;
use layout::{RadialConfig, RadialLayout, RectangularLayout, UnrootedLayout};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{FlatRow, Node, NodeId, PhyloError, Tree};
    pub use crate::layout::{
        AngleStrategy, Arc, ArcStyle, Edge, RadialConfig, RadialLayout, RadialNode, RectNode,
        RectangularLayout, Segment, Spoke, Sweep, UnrootedLayout, UnrootedNode,
    };
}

/// Parse a Newick string into a rooted tree
///
/// # Example
/// ```rust
/// let tree = phyloplot::parse("(A:0.1,B:0.2);").unwrap();
/// assert_eq!(tree.tip_count(), 2);
/// ```
pub fn parse(input: &str) -> Result<Tree> {
    newick::parse(input)
}

/// Parse a Newick string and compute its rectangular (cladogram) layout
pub fn rectangular(input: &str) -> Result<RectangularLayout> {
    let tree = newick::parse(input)?;
    layout::rectangular(&tree)
}

/// Parse a Newick string and compute its radial layout with default options
///
/// Use [`layout::radial`] with a [`RadialConfig`] for the fan angle strategy
/// or fan-block arcs.
pub fn radial(input: &str) -> Result<RadialLayout> {
    let tree = newick::parse(input)?;
    layout::radial(&tree, &RadialConfig::default())
}

/// Parse a Newick string and compute its unrooted equal-angle layout
pub fn unrooted(input: &str) -> Result<UnrootedLayout> {
    let tree = newick::parse(input)?;
    layout::unrooted(&tree)
}
