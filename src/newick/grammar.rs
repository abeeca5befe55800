//! Newick grammar
//!
//! Parses the parenthesized structure of a Newick string into a raw nested
//! node. Label/branch-length interpretation (colon splitting, float parsing,
//! id assignment) is left to the driver in `newick::mod`, which keeps the
//! grammar purely structural.

use chumsky::prelude::*;

/// Raw parse result for one node: the `:`-separated text segments that
/// follow it, plus its subtrees.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RawNode {
    pub segments: Vec<String>,
    pub children: Vec<RawNode>,
}

/// Parser for a whole Newick string (one tree, optional trailing `;`).
///
/// Structural characters are `( ) , : ;`; everything else is label/length
/// text. Whitespace must already be stripped by the caller.
pub(super) fn tree_parser<'src>() -> impl Parser<'src, &'src str, RawNode> {
    let subtree = recursive(|subtree| {
        let children = subtree
            .separated_by(just(','))
            .at_least(1)
            .collect::<Vec<RawNode>>()
            .delimited_by(just('('), just(')'));

        // A segment may be empty: ":0.5" is an unlabeled node with a length,
        // and a bare "(A,B)" inner node has a single empty segment.
        let segment = none_of("():,;").repeated().collect::<String>();
        let info = segment
            .separated_by(just(':'))
            .at_least(1)
            .collect::<Vec<String>>();

        children
            .or_not()
            .then(info)
            .map(|(children, segments)| RawNode {
                segments,
                children: children.unwrap_or_default(),
            })
    });

    subtree.then_ignore(just(';').or_not()).then_ignore(end())
}
