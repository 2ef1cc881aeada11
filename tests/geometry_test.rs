//! Tests for bounds computation and centering

use rstest::rstest;

use famgraph::domain::{
    calculate_graph_bounds, center_graph, GraphBounds, NodeSizing, Person, Position, Size,
    TreeNode, Union,
};

fn person_at(id: &str, x: f64, y: f64) -> TreeNode {
    TreeNode::person(Person::new(id, id, "Test")).with_position(Position::new(x, y))
}

fn union_at(id: &str, x: f64, y: f64) -> TreeNode {
    TreeNode::union(Union::new(id, "P1", None)).with_position(Position::new(x, y))
}

#[test]
fn given_no_nodes_when_computing_bounds_then_all_zero() {
    // Act
    let bounds = calculate_graph_bounds(&[], &NodeSizing::default());

    // Assert
    assert_eq!(bounds, GraphBounds::default());
    assert_eq!(bounds.width, 0.0);
    assert_eq!(bounds.height, 0.0);
}

#[test]
fn given_single_person_when_computing_bounds_then_covers_its_footprint() {
    // Arrange
    let nodes = vec![person_at("P1", 10.0, 20.0)];

    // Act
    let bounds = calculate_graph_bounds(&nodes, &NodeSizing::default());

    // Assert
    assert_eq!(bounds.min_x, 10.0);
    assert_eq!(bounds.min_y, 20.0);
    assert_eq!(bounds.max_x, 190.0);
    assert_eq!(bounds.max_y, 100.0);
    assert_eq!((bounds.width, bounds.height), (180.0, 80.0));
}

#[test]
fn given_person_and_union_when_computing_bounds_then_kind_sizes_apply() {
    // Arrange
    let nodes = vec![person_at("P1", 0.0, 0.0), union_at("U1", 300.0, 200.0)];

    // Act
    let bounds = calculate_graph_bounds(&nodes, &NodeSizing::default());

    // Assert
    assert_eq!(bounds.max_x, 320.0);
    assert_eq!(bounds.max_y, 220.0);
}

#[test]
fn given_custom_sizing_when_computing_bounds_then_custom_footprint_used() {
    // Arrange
    let sizing = NodeSizing {
        person: Size::new(100.0, 50.0),
        union: Size::new(10.0, 10.0),
    };
    let nodes = vec![person_at("P1", 0.0, 0.0)];

    // Act
    let bounds = calculate_graph_bounds(&nodes, &sizing);

    // Assert
    assert_eq!((bounds.width, bounds.height), (100.0, 50.0));
}

#[rstest]
#[case(vec![person_at("P1", 0.0, 0.0)])]
#[case(vec![person_at("P1", 40.0, -15.0), union_at("U1", 500.0, 300.0)])]
#[case(vec![
    person_at("P1", -200.0, 10.0),
    person_at("P2", 0.0, 10.0),
    union_at("U1", 90.0, 120.0),
    person_at("C1", 5.0, 220.0),
])]
fn given_nodes_when_centering_then_bounds_are_symmetric_around_origin(#[case] nodes: Vec<TreeNode>) {
    // Arrange
    let sizing = NodeSizing::default();
    let before = calculate_graph_bounds(&nodes, &sizing);

    // Act
    let centered = center_graph(&nodes, &sizing);

    // Assert
    let after = calculate_graph_bounds(&centered, &sizing);
    assert!((after.min_x + after.max_x).abs() < 1e-9);
    assert!((after.min_y + after.max_y).abs() < 1e-9);
    assert!((after.width - before.width).abs() < 1e-9);
    assert!((after.height - before.height).abs() < 1e-9);
}

#[test]
fn given_nodes_when_centering_then_input_is_untouched_and_order_kept() {
    // Arrange
    let nodes = vec![person_at("P1", 0.0, 0.0), person_at("P2", 400.0, 0.0)];

    // Act
    let centered = center_graph(&nodes, &NodeSizing::default());

    // Assert
    assert_eq!(nodes[0].position, Position::new(0.0, 0.0));
    let ids: Vec<&str> = centered.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P2"]);
    // bounds 0..580 x 0..80, centre (290, 40)
    assert_eq!(centered[0].position, Position::new(-290.0, -40.0));
    assert_eq!(centered[1].position, Position::new(110.0, -40.0));
}

#[test]
fn given_no_nodes_when_centering_then_empty() {
    // Act
    let centered = center_graph(&[], &NodeSizing::default());

    // Assert
    assert!(centered.is_empty());
}
