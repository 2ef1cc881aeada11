//! Tests for build_graph

use std::collections::HashSet;

use rstest::rstest;

use famgraph::domain::{
    build_graph, validate_graph, EdgeKind, NodeKind, ParentChild, Person, TreeData, Union,
    UnionChild,
};

fn persons(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id, *id, "Test")).collect()
}

fn edge_pairs(graph: &famgraph::domain::Graph) -> Vec<(String, String)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}

fn couple_with_child() -> TreeData {
    TreeData {
        persons: persons(&["P1", "P2", "C1"]),
        parent_child: vec![],
        unions: vec![Union::new("U1", "P1", Some("P2"))],
        union_children: vec![UnionChild::new("U1", "C1")],
    }
}

fn single_parent() -> TreeData {
    TreeData {
        persons: persons(&["P1", "C1"]),
        parent_child: vec![ParentChild::new("P1", "C1")],
        unions: vec![],
        union_children: vec![],
    }
}

#[test]
fn given_couple_with_child_when_building_then_child_hangs_off_union_node() {
    // Arrange
    let data = couple_with_child();

    // Act
    let graph = build_graph(&data);

    // Assert
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P2", "C1", "U1"]);
    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("P1".to_string(), "U1".to_string()),
            ("P2".to_string(), "U1".to_string()),
            ("U1".to_string(), "C1".to_string()),
        ]
    );
    assert_eq!(graph.node("U1").map(|n| n.kind()), Some(NodeKind::Union));
}

#[test]
fn given_couple_with_child_when_building_then_edge_ids_and_kinds_are_deterministic() {
    // Arrange
    let data = couple_with_child();

    // Act
    let graph = build_graph(&data);

    // Assert
    let ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["P1-U1", "P2-U1", "U1-C1"]);
    let kinds: Vec<EdgeKind> = graph.edges.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EdgeKind::Partner, EdgeKind::Partner, EdgeKind::Offspring]
    );
    assert_eq!(build_graph(&data), graph, "building twice yields the same graph");
}

#[test]
fn given_single_parent_when_building_then_direct_edge_and_no_union_node() {
    // Arrange
    let data = single_parent();

    // Act
    let graph = build_graph(&data);

    // Assert
    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.nodes.iter().all(|n| n.kind() == NodeKind::Person));
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].id, "P1-C1");
    assert_eq!(graph.edges[0].kind, EdgeKind::Parent);
}

#[test]
fn given_union_with_one_partner_when_building_then_single_partner_edge() {
    // Arrange
    let data = TreeData {
        persons: persons(&["P1", "C1"]),
        parent_child: vec![],
        unions: vec![Union::new("U1", "P1", None)],
        union_children: vec![UnionChild::new("U1", "C1")],
    };

    // Act
    let graph = build_graph(&data);

    // Assert
    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("P1".to_string(), "U1".to_string()),
            ("U1".to_string(), "C1".to_string()),
        ]
    );
}

#[test]
fn given_parent_link_of_unioned_parent_when_building_then_union_path_is_used() {
    // Arrange: P1 is in U1, so P1 -> C1 is covered by U1 -> C1
    let mut data = couple_with_child();
    data.parent_child.push(ParentChild::new("P1", "C1"));

    // Act
    let graph = build_graph(&data);

    // Assert
    assert!(!graph.edges.iter().any(|e| e.kind == EdgeKind::Parent));
    assert_eq!(graph.edges.len(), 3);
}

#[test]
fn given_mixed_family_when_building_then_only_ununioned_parent_bypasses_unions() {
    // Arrange: S1 has no union, P1 does
    let mut data = couple_with_child();
    data.persons.extend(persons(&["S1", "C2"]));
    data.parent_child.push(ParentChild::new("S1", "C2"));

    // Act
    let graph = build_graph(&data);

    // Assert
    let direct: Vec<&str> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Parent)
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(direct, vec!["S1-C2"]);
    assert!(!graph.edges.iter().any(|e| e.target == "C2" && e.source != "S1"));
}

#[test]
fn given_empty_data_when_building_then_empty_graph() {
    // Act
    let graph = build_graph(&TreeData::default());

    // Assert
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
}

#[rstest]
#[case::couple(couple_with_child())]
#[case::single_parent(single_parent())]
#[case::three_generations(TreeData {
    persons: persons(&["G1", "G2", "P1", "P2", "C1", "C2"]),
    parent_child: vec![],
    unions: vec![Union::new("UG", "G1", Some("G2")), Union::new("U1", "P1", Some("P2"))],
    union_children: vec![
        UnionChild::new("UG", "P1"),
        UnionChild::new("U1", "C1"),
        UnionChild::new("U1", "C2"),
    ],
})]
fn given_well_formed_data_when_building_then_ids_unique_and_edges_closed(#[case] data: TreeData) {
    // Act
    let graph = build_graph(&data);

    // Assert
    let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len(), "node ids must be unique");
    let report = validate_graph(&graph.nodes, &graph.edges);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
}

#[test]
fn given_built_nodes_when_inspecting_then_positions_start_at_origin() {
    // Act
    let graph = build_graph(&couple_with_child());

    // Assert
    assert!(graph
        .nodes
        .iter()
        .all(|n| n.position.x == 0.0 && n.position.y == 0.0));
    assert!(graph.nodes.iter().all(|n| n.on_add_relative.is_none()));
}
