//! Newick parser
//!
//! Converts a Newick string such as `(A:0.1,(B:0.2,C:0.3):0.4);` into a
//! rooted [`Tree`]. The chumsky grammar in [`grammar`] handles structure;
//! this driver strips whitespace, interprets label/branch-length segments,
//! and assigns node ids in an explicit post-order pass (children before
//! parents, root last) while building the arena.
//!
//! # Lenient token recovery
//!
//! A token with more than one `:` (e.g. `A:1:2`) is not standard Newick.
//! Matching the permissive behavior this crate replaces, the first segment is
//! taken as the label and the last as the branch length, and a warning is
//! logged; callers that want strict input can treat that warning as fatal.
//! Unbalanced parentheses and unparseable branch lengths are hard errors.

mod grammar;

use anyhow::Result;
use chumsky::Parser as _;
use tracing::{debug, span, trace, warn, Level};

use crate::core::{Node, NodeId, PhyloError, Tree};
use grammar::RawNode;

/// Parse a Newick string into a rooted tree.
///
/// Whitespace is stripped before parsing. The trailing `;` is optional.
///
/// # Example
/// ```rust
/// let tree = phyloplot::newick::parse("(A:0.1,B:0.2);").unwrap();
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.tip_count(), 2);
/// ```
pub fn parse(text: &str) -> Result<Tree> {
    let parse_span = span!(Level::INFO, "parse_newick", input_len = text.len());
    let _enter = parse_span.enter();

    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Err(PhyloError::parse_error("empty Newick string").into());
    }

    trace!("Parsing Newick structure");
    let raw = grammar::tree_parser()
        .parse(stripped.as_str())
        .into_result()
        .map_err(|errors| {
            PhyloError::parse_error(format!("malformed Newick string: {:?}", errors))
        })?;

    let mut nodes = Vec::new();
    let root = build(&raw, &mut nodes)?;
    debug!(node_count = nodes.len(), root, "Parsed tree");

    Ok(Tree::from_nodes(nodes, root)?)
}

/// Recursively convert a raw node into arena nodes, post-order.
///
/// Children are pushed before their parent, so arena index order is
/// post-order and the returned root id is the highest.
fn build(raw: &RawNode, nodes: &mut Vec<Node>) -> Result<NodeId, PhyloError> {
    let child_ids: Vec<NodeId> = raw
        .children
        .iter()
        .map(|child| build(child, nodes))
        .collect::<Result<_, _>>()?;

    let (label, branch_length) = interpret_segments(&raw.segments)?;

    let id = nodes.len();
    nodes.push(Node {
        id,
        parent: None,
        children: child_ids.clone(),
        label,
        branch_length,
    });
    for child in child_ids {
        nodes[child].parent = Some(id);
    }
    Ok(id)
}

/// Interpret the `:`-separated segments following a node.
fn interpret_segments(segments: &[String]) -> Result<(String, Option<f64>), PhyloError> {
    match segments {
        [] | [_] => {
            let label = segments.first().cloned().unwrap_or_default();
            Ok((label, None))
        }
        [label, length] => Ok((label.clone(), Some(parse_length(length)?))),
        [label, .., length] => {
            let token = segments.join(":");
            warn!(%token, "token has more than one ':'; using first segment as label and last as branch length");
            Ok((label.clone(), Some(parse_length(length)?)))
        }
    }
}

fn parse_length(text: &str) -> Result<f64, PhyloError> {
    text.parse::<f64>().map_err(|_| {
        PhyloError::parse_error(format!("invalid branch length '{}'", text))
    })
}
