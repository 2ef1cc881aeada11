//! Graph builder: relational tree data to person/union nodes and edges.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::entities::{EdgeKind, Graph, TreeData, TreeEdge, TreeNode};

/// Build a fresh graph from relational tree data.
///
/// Children of a recorded union hang off a synthetic union node. Parents that take
/// part in no union at all get direct parent to child edges instead, so a single
/// parent never produces a dangling union node.
///
/// `ParentChild` records whose parent *is* in some union are dropped: for those,
/// `UnionChild` is the authoritative link and is not cross-checked here.
#[instrument(level = "debug", skip(data), fields(persons = data.persons.len(), unions = data.unions.len()))]
pub fn build_graph(data: &TreeData) -> Graph {
    let mut nodes = Vec::with_capacity(data.persons.len() + data.unions.len());
    nodes.extend(data.persons.iter().cloned().map(TreeNode::person));
    nodes.extend(data.unions.iter().cloned().map(TreeNode::union));

    let mut edges = Vec::new();

    for union in &data.unions {
        for partner in union.partners() {
            edges.push(TreeEdge::between(partner, &union.union_id, EdgeKind::Partner));
        }
    }

    for link in &data.union_children {
        edges.push(TreeEdge::between(
            &link.union_id,
            &link.child_id,
            EdgeKind::Offspring,
        ));
    }

    let unioned = unioned_parents(data);
    let mut dropped = 0usize;
    for link in &data.parent_child {
        if unioned.contains(link.parent_id.as_str()) {
            dropped += 1;
            continue;
        }
        edges.push(TreeEdge::between(
            &link.parent_id,
            &link.child_id,
            EdgeKind::Parent,
        ));
    }

    debug!(
        "build_graph: {} nodes, {} edges ({} parent links covered by unions)",
        nodes.len(),
        edges.len(),
        dropped
    );
    Graph::new(nodes, edges)
}

/// Every person id that appears as `p1` or `p2` of some union.
fn unioned_parents(data: &TreeData) -> HashSet<&str> {
    data.unions.iter().flat_map(|u| u.partners()).collect()
}
