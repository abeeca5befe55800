//! Integration tests for the rectangular (cladogram) layout

use phyloplot::layout::rectangular;
use phyloplot::newick;

const FIXTURE: &str = "(A:1,(B:2,C:3):4);";

#[test]
fn test_horizontal_span_equals_branch_length() {
    let tree = newick::parse(FIXTURE).unwrap();
    let layout = rectangular(&tree).unwrap();
    for row in &layout.data {
        assert!(
            (row.x1 - row.x0 - row.branch_length).abs() < 1e-12,
            "node {} span {} != branch length {}",
            row.this_id,
            row.x1 - row.x0,
            row.branch_length
        );
    }
    let root = layout.data.iter().find(|r| r.parent_id.is_none()).unwrap();
    assert_eq!(root.x0, 0.0);
}

#[test]
fn test_cumulative_x_positions() {
    let tree = newick::parse(FIXTURE).unwrap();
    let layout = rectangular(&tree).unwrap();
    let x1_of = |label: &str| {
        layout
            .data
            .iter()
            .find(|r| r.this_label == label)
            .unwrap()
            .x1
    };
    assert_eq!(x1_of("A"), 1.0);
    assert_eq!(x1_of("B"), 6.0);
    assert_eq!(x1_of("C"), 7.0);
}

#[test]
fn test_tip_slots_are_one_to_n() {
    let tree = newick::parse("((A,B),(C,(D,E)));").unwrap();
    let layout = rectangular(&tree).unwrap();
    let mut slots: Vec<f64> = layout
        .data
        .iter()
        .filter(|r| r.is_tip)
        .map(|r| r.y0)
        .collect();
    slots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected: Vec<f64> = (1..=5).map(|i| i as f64).collect();
    assert_eq!(slots, expected);
}

#[test]
fn test_ladderized_input_order_is_preserved() {
    let tree = newick::parse("(D,(C,(B,A)));").unwrap();
    let layout = rectangular(&tree).unwrap();
    let slot_of = |label: &str| {
        layout
            .data
            .iter()
            .find(|r| r.this_label == label)
            .unwrap()
            .y0
    };
    assert_eq!(slot_of("D"), 1.0);
    assert_eq!(slot_of("C"), 2.0);
    assert_eq!(slot_of("B"), 3.0);
    assert_eq!(slot_of("A"), 4.0);
}

#[test]
fn test_vertical_stem_spans_children() {
    let tree = newick::parse(FIXTURE).unwrap();
    let layout = rectangular(&tree).unwrap();
    // Root stem spans tip A (slot 1) to the inner node's mean (2.5).
    let root = layout.data.iter().find(|r| r.parent_id.is_none()).unwrap();
    let stem = layout
        .vertical_lines
        .iter()
        .find(|s| s.node_id == root.this_id)
        .unwrap();
    assert_eq!(stem.y0, 1.0);
    assert_eq!(stem.y1, 2.5);
    assert_eq!(stem.x0, root.x1);
}

#[test]
fn test_horizontal_lines_carry_labels_and_tip_flags() {
    let tree = newick::parse(FIXTURE).unwrap();
    let layout = rectangular(&tree).unwrap();
    let a = layout
        .horizontal_lines
        .iter()
        .find(|s| s.label == "A")
        .unwrap();
    assert!(a.is_tip);
    let internal = layout
        .horizontal_lines
        .iter()
        .find(|s| !s.is_tip)
        .unwrap();
    assert!(internal.parent_id.is_some());
}

#[test]
fn test_child_verticals_give_per_edge_granularity() {
    let tree = newick::parse("(A,B,C);").unwrap();
    let layout = rectangular(&tree).unwrap();
    // One shared stem but three per-edge verticals.
    assert_eq!(layout.vertical_lines.len(), 1);
    assert_eq!(layout.child_verticals.len(), 3);
    // The middle child sits at the parent's height: degenerate but present.
    let b = layout
        .child_verticals
        .iter()
        .find(|s| s.label == "B")
        .unwrap();
    assert_eq!(b.y0, b.y1);
}

#[test]
fn test_layout_is_deterministic() {
    let tree = newick::parse(FIXTURE).unwrap();
    let first = rectangular(&tree).unwrap();
    let second = rectangular(&tree).unwrap();
    assert_eq!(first, second);
}
