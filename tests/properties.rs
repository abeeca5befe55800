//! Property tests over randomly generated Newick trees

use phyloplot::layout::{radial, rectangular, unrooted, RadialConfig};
use phyloplot::newick;
use proptest::prelude::*;
use std::collections::HashSet;

fn branch_length() -> impl Strategy<Value = f64> {
    // Two-decimal lengths survive the Display/parse round trip exactly.
    (0u32..1000).prop_map(|n| n as f64 / 100.0)
}

fn newick_subtree() -> impl Strategy<Value = String> {
    let leaf = ("[a-z]{1,6}", branch_length()).prop_map(|(label, bl)| format!("{label}:{bl}"));
    leaf.prop_recursive(4, 48, 4, |inner| {
        (proptest::collection::vec(inner, 2..=4), branch_length())
            .prop_map(|(children, bl)| format!("({}):{}", children.join(","), bl))
    })
}

fn newick_tree() -> impl Strategy<Value = String> {
    proptest::collection::vec(newick_subtree(), 2..=4)
        .prop_map(|children| format!("({});", children.join(",")))
}

proptest! {
    #[test]
    fn exactly_one_root_row(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = rectangular(&tree).unwrap();
        let roots: Vec<_> = layout.data.iter().filter(|r| r.parent_id.is_none()).collect();
        prop_assert_eq!(roots.len(), 1);
        prop_assert!(roots[0].branch_length == 0.0);
    }

    #[test]
    fn every_parent_resolves(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = rectangular(&tree).unwrap();
        for row in &layout.data {
            if let Some(parent) = row.parent_id {
                let p = layout.data.iter().find(|r| r.this_id == parent);
                prop_assert!(p.is_some(), "row {} has dangling parent {}", row.this_id, parent);
                prop_assert!(p.unwrap().children.contains(&row.this_id));
            }
        }
    }

    #[test]
    fn tip_slots_are_a_permutation(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = rectangular(&tree).unwrap();
        let slots: HashSet<u64> = layout
            .data
            .iter()
            .filter(|r| r.is_tip)
            .map(|r| r.y0 as u64)
            .collect();
        let ntips = layout.data.iter().filter(|r| r.is_tip).count() as u64;
        prop_assert_eq!(slots, (1..=ntips).collect::<HashSet<u64>>());
    }

    #[test]
    fn radius_is_additive_along_edges(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = radial(&tree, &RadialConfig::default()).unwrap();
        for row in &layout.data {
            if let Some(parent) = row.parent_id {
                let expected = layout.data[parent].r + row.branch_length;
                prop_assert!((row.r - expected).abs() < 1e-9,
                    "node {} r={} parent r={} bl={}",
                    row.this_id, row.r, layout.data[parent].r, row.branch_length);
            }
        }
    }

    #[test]
    fn radial_angles_are_normalized(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = radial(&tree, &RadialConfig::default()).unwrap();
        for row in &layout.data {
            prop_assert!(row.angle >= 0.0 && row.angle < std::f64::consts::TAU,
                "angle {} out of range", row.angle);
        }
    }

    #[test]
    fn unrooted_edge_length_matches_branch_length(text in newick_tree()) {
        let tree = newick::parse(&text).unwrap();
        let layout = unrooted(&tree).unwrap();
        for edge in &layout.edges {
            let child = layout.data.iter().find(|r| r.this_id == edge.id1).unwrap();
            let dist = ((edge.x1 - edge.x2).powi(2) + (edge.y1 - edge.y2).powi(2)).sqrt();
            prop_assert!((dist - child.branch_length).abs() < 1e-9,
                "edge {}->{} length {} expected {}",
                edge.id1, edge.id2, dist, child.branch_length);
        }
    }

    #[test]
    fn parse_is_deterministic(text in newick_tree()) {
        let t1 = newick::parse(&text).unwrap();
        let t2 = newick::parse(&text).unwrap();
        let l1 = rectangular(&t1).unwrap();
        let l2 = rectangular(&t2).unwrap();
        prop_assert_eq!(l1, l2);
    }
}
