//! Tests for the tree data sources

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use famgraph::domain::{build_graph, validate_graph, Gender, TreeData};
use famgraph::infrastructure::{
    InfraError, JsonFileSource, RealFileSystem, StaticSource, TreeSource,
};

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

fn json_source(path: PathBuf) -> JsonFileSource {
    JsonFileSource::new(Arc::new(RealFileSystem), path)
}

#[fixture]
fn scratch() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn given_family_file_when_loaded_then_all_records_present() {
    // Act
    let data = json_source(resource("family.json")).load().expect("load family");

    // Assert
    assert_eq!(data.persons.len(), 8);
    assert_eq!(data.unions.len(), 2);
    assert_eq!(data.parent_child.len(), 2);
    assert_eq!(data.union_children.len(), 3);
    let g2 = data.persons.iter().find(|p| p.id == "G2").unwrap();
    assert_eq!(g2.maiden_name.as_deref(), Some("Vogt"));
}

#[test]
fn given_family_file_when_built_then_union_nodes_and_edges_derived() {
    // Arrange
    let data = json_source(resource("family.json")).load().unwrap();

    // Act
    let graph = build_graph(&data);

    // Assert
    assert_eq!(graph.nodes.len(), 10);
    assert_eq!(graph.edges.len(), 8);
    assert!(graph.edges.iter().all(|e| e.id != "P1-C1"));
    assert!(validate_graph(&graph.nodes, &graph.edges).valid);
}

#[test]
fn given_dangling_file_when_built_then_validation_reports_errors() {
    // Arrange
    let data = json_source(resource("dangling.json")).load().unwrap();

    // Act
    let graph = build_graph(&data);
    let report = validate_graph(&graph.nodes, &graph.edges);

    // Assert
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
}

#[rstest]
fn given_missing_file_when_loaded_then_io_error(scratch: TempDir) {
    // Arrange
    let source = json_source(scratch.path().join("absent.json"));

    // Act
    let result = source.load();

    // Assert
    match result {
        Err(InfraError::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[rstest]
#[case::not_json("persons: []")]
#[case::wrong_shape(r#"{"persons": {"id": "P1"}}"#)]
#[case::missing_person_id(r#"{"persons": [{"first_name": "Anna"}]}"#)]
fn given_malformed_file_when_loaded_then_json_error(scratch: TempDir, #[case] content: &str) {
    // Arrange
    let path = scratch.path().join("bad.json");
    fs::write(&path, content).unwrap();

    // Act
    let result = json_source(path).load();

    // Assert
    assert!(
        matches!(result, Err(InfraError::Json { .. })),
        "expected json error, got {:?}",
        result
    );
}

#[rstest]
fn given_sparse_records_when_loaded_then_defaults_applied(scratch: TempDir) {
    // Arrange
    let path = scratch.path().join("sparse.json");
    fs::write(&path, r#"{"persons": [{"id": "P1"}]}"#).unwrap();

    // Act
    let data = json_source(path).load().unwrap();

    // Assert
    let p1 = &data.persons[0];
    assert_eq!(p1.gender, Gender::Unknown);
    assert!(p1.is_living);
    assert!(data.unions.is_empty());
    assert_eq!(p1.display_name(), "P1");
}

#[test]
fn given_static_source_when_loaded_then_returns_clone() {
    // Arrange
    let data = json_source(resource("family.json")).load().unwrap();
    let source = StaticSource(data.clone());

    // Act
    let loaded: TreeData = source.load().unwrap();

    // Assert
    assert_eq!(loaded, data);
}
