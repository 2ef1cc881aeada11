//! Tests for the depth and lineage filters

use std::collections::HashSet;

use rstest::rstest;

use famgraph::domain::{
    build_graph, filter_graph_by_depth, filter_graph_by_lineage, Graph, ParentChild, Person,
    TreeData, TreeMode, TreeQuery, Union, UnionChild,
};

fn couple_with_child() -> Graph {
    build_graph(&TreeData {
        persons: ["P1", "P2", "C1"]
            .iter()
            .map(|id| Person::new(*id, *id, "Test"))
            .collect(),
        parent_child: vec![],
        unions: vec![Union::new("U1", "P1", Some("P2"))],
        union_children: vec![UnionChild::new("U1", "C1")],
    })
}

/// G1+G2 -> P1; P1+P2 -> C1, C2; S1 -> C3 (no union)
fn three_generations() -> Graph {
    build_graph(&TreeData {
        persons: ["G1", "G2", "P1", "P2", "C1", "C2", "S1", "C3"]
            .iter()
            .map(|id| Person::new(*id, *id, "Test"))
            .collect(),
        parent_child: vec![ParentChild::new("S1", "C3")],
        unions: vec![
            Union::new("UG", "G1", Some("G2")),
            Union::new("U1", "P1", Some("P2")),
        ],
        union_children: vec![
            UnionChild::new("UG", "P1"),
            UnionChild::new("U1", "C1"),
            UnionChild::new("U1", "C2"),
        ],
    })
}

fn node_ids(graph: &Graph) -> HashSet<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

fn edge_ids(graph: &Graph) -> HashSet<&str> {
    graph.edges.iter().map(|e| e.id.as_str()).collect()
}

fn set<'a>(ids: &[&'a str]) -> HashSet<&'a str> {
    ids.iter().copied().collect()
}

// ============================================================
// filter_graph_by_depth
// ============================================================

#[test]
fn given_couple_when_filtering_depth_one_from_partner_then_keeps_partner_and_union_only() {
    // Arrange
    let graph = couple_with_child();

    // Act
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "P1", 1);

    // Assert: C1 and P2 are two hops away through U1
    assert_eq!(node_ids(&filtered), set(&["P1", "U1"]));
    assert_eq!(edge_ids(&filtered), set(&["P1-U1"]));
}

#[test]
fn given_existing_proband_when_filtering_depth_zero_then_only_proband() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "P1", 0);

    // Assert
    assert_eq!(filtered.nodes.len(), 1);
    assert_eq!(filtered.nodes[0].id, "P1");
    assert!(filtered.edges.is_empty());
}

#[rstest]
#[case(0)]
#[case(3)]
fn given_missing_proband_when_filtering_then_empty_graph(#[case] depth: usize) {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "NOBODY", depth);

    // Assert
    assert!(filtered.nodes.is_empty());
    assert!(filtered.edges.is_empty());
}

#[test]
fn given_child_when_filtering_then_edges_are_walked_in_both_directions() {
    // Arrange
    let graph = three_generations();

    // Act: C1 -> U1 -> {P1, P2, C2} at two hops, against edge direction for P1/P2
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "C1", 2);

    // Assert
    assert_eq!(node_ids(&filtered), set(&["C1", "U1", "P1", "P2", "C2"]));
}

#[test]
fn given_graph_when_filtering_then_input_order_is_preserved() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "P1", 2);

    // Assert
    let expected: Vec<&str> = graph
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| node_ids(&filtered).contains(id))
        .collect();
    let actual: Vec<&str> = filtered.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn given_disconnected_component_when_filtering_then_it_is_never_reached() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = filter_graph_by_depth(&graph.nodes, &graph.edges, "P1", 10);

    // Assert
    let ids = node_ids(&filtered);
    assert!(!ids.contains("S1"));
    assert!(!ids.contains("C3"));
    assert_eq!(ids.len(), 8);
}

#[rstest]
fn given_any_depth_when_filtering_then_result_grows_monotonically(
    #[values("G1", "P1", "C2", "U1", "S1")] root: &str,
    #[values(0, 1, 2, 3, 4)] k: usize,
) {
    // Arrange
    let graph = three_generations();

    // Act
    let smaller = filter_graph_by_depth(&graph.nodes, &graph.edges, root, k);
    let larger = filter_graph_by_depth(&graph.nodes, &graph.edges, root, k + 1);

    // Assert
    assert!(node_ids(&smaller).is_subset(&node_ids(&larger)));
    assert!(edge_ids(&smaller).is_subset(&edge_ids(&larger)));
}

// ============================================================
// filter_graph_by_lineage
// ============================================================

fn lineage(graph: &Graph, proband: &str, mode: TreeMode, depth: usize) -> Graph {
    let query = TreeQuery {
        proband_id: proband.to_string(),
        mode,
        depth,
    };
    filter_graph_by_lineage(&graph.nodes, &graph.edges, &query)
}

#[test]
fn given_child_when_filtering_ancestors_one_generation_then_parents_and_union() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "C1", TreeMode::Ancestors, 1);

    // Assert: siblings are not ancestors
    assert_eq!(node_ids(&filtered), set(&["C1", "U1", "P1", "P2"]));
    assert_eq!(edge_ids(&filtered), set(&["P1-U1", "P2-U1", "U1-C1"]));
}

#[test]
fn given_child_when_filtering_ancestors_two_generations_then_grandparents_included() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "C1", TreeMode::Ancestors, 2);

    // Assert
    assert_eq!(
        node_ids(&filtered),
        set(&["C1", "U1", "P1", "P2", "UG", "G1", "G2"])
    );
}

#[test]
fn given_grandparent_when_filtering_descendants_one_generation_then_stops_at_children() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "G1", TreeMode::Descendants, 1);

    // Assert: the co-parent G2 is kept, P1's own union is a generation further
    assert_eq!(node_ids(&filtered), set(&["G1", "G2", "UG", "P1"]));
    assert_eq!(edge_ids(&filtered), set(&["G1-UG", "G2-UG", "UG-P1"]));
}

#[test]
fn given_grandparent_when_filtering_descendants_two_generations_then_married_in_partner_kept() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "G1", TreeMode::Descendants, 2);

    // Assert
    let ids = node_ids(&filtered);
    assert!(ids.contains("P2"), "partner of a reached union is kept");
    assert!(ids.contains("C1") && ids.contains("C2"));
    assert!(!ids.contains("S1"));
}

#[test]
fn given_middle_generation_when_filtering_hourglass_then_union_of_both_walks() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "P1", TreeMode::Hourglass, 1);

    // Assert
    assert_eq!(
        node_ids(&filtered),
        set(&["P1", "UG", "G1", "G2", "U1", "P2", "C1", "C2"])
    );
}

#[rstest]
#[case(TreeMode::Ancestors)]
#[case(TreeMode::Descendants)]
#[case(TreeMode::Hourglass)]
fn given_depth_zero_when_filtering_lineage_then_only_proband(#[case] mode: TreeMode) {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "P1", mode, 0);

    // Assert
    assert_eq!(node_ids(&filtered), set(&["P1"]));
    assert!(filtered.edges.is_empty());
}

#[test]
fn given_missing_proband_when_filtering_lineage_then_empty_graph() {
    // Arrange
    let graph = three_generations();

    // Act
    let filtered = lineage(&graph, "NOBODY", TreeMode::Hourglass, 3);

    // Assert
    assert!(filtered.is_empty());
}
