//! Domain entities: relational records and the derived graph primitives

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender as recorded by the data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

/// A person snapshot supplied by the data source. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,
    #[serde(default = "default_living")]
    pub is_living: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

fn default_living() -> bool {
    true
}

impl Person {
    /// Minimal person with just an id and a name, everything else defaulted.
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            maiden_name: None,
            gender: Gender::Unknown,
            birth_date: None,
            death_date: None,
            is_living: true,
            photo_url: None,
        }
    }

    /// "First Middle Last (née Maiden)", skipping empty parts.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        {
            if !part.trim().is_empty() {
                parts.push(part.trim());
            }
        }
        let mut name = if parts.is_empty() {
            self.id.clone()
        } else {
            parts.join(" ")
        };
        if let Some(maiden) = self.maiden_name.as_deref().filter(|m| !m.trim().is_empty()) {
            name.push_str(&format!(" (née {})", maiden.trim()));
        }
        name
    }
}

/// Ordered (parent, child) link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentChild {
    pub parent_id: String,
    pub child_id: String,
}

impl ParentChild {
    pub fn new(parent_id: impl Into<String>, child_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
        }
    }
}

/// Marriage or partnership between one or two people.
///
/// `p2` is optional to support single-parent and unknown-partner unions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Union {
    pub union_id: String,
    pub p1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<NaiveDate>,
}

impl Union {
    pub fn new(union_id: impl Into<String>, p1: impl Into<String>, p2: Option<&str>) -> Self {
        Self {
            union_id: union_id.into(),
            p1: p1.into(),
            p2: p2.map(str::to_string),
            p1_role: None,
            p2_role: None,
            marriage_date: None,
            divorce_date: None,
        }
    }

    /// Partners in declaration order: `p1`, then `p2` if present.
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.p1.as_str()).chain(self.p2.as_deref())
    }
}

/// Links a union to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionChild {
    pub union_id: String,
    pub child_id: String,
}

impl UnionChild {
    pub fn new(union_id: impl Into<String>, child_id: impl Into<String>) -> Self {
        Self {
            union_id: union_id.into(),
            child_id: child_id.into(),
        }
    }
}

/// Aggregate supplied by the data source. Read-only input to the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeData {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub parent_child: Vec<ParentChild>,
    #[serde(default)]
    pub unions: Vec<Union>,
    #[serde(default)]
    pub union_children: Vec<UnionChild>,
}

impl TreeData {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.unions.is_empty()
    }
}

/// Which relatives the data source was asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    Ancestors,
    Descendants,
    #[default]
    Hourglass,
}

/// Query shape used by the data source to produce a [`TreeData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeQuery {
    pub proband_id: String,
    #[serde(default)]
    pub mode: TreeMode,
    pub depth: usize,
}

/// Logical coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node discriminant, used to key the sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Person,
    Union,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Person => write!(f, "person"),
            NodeKind::Union => write!(f, "union"),
        }
    }
}

/// Tagged payload of a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeData {
    Person(Person),
    Union(Union),
}

/// Opaque "add a relative of this person" hook carried by person nodes.
///
/// Receives the id of the person the request was made on.
#[derive(Clone)]
pub struct RelativeCallback(Arc<dyn Fn(&str) + Send + Sync>);

impl RelativeCallback {
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, person_id: &str) {
        (self.0)(person_id)
    }

    /// Identity comparison: two callbacks are equal if they wrap the same closure.
    pub fn same_as(&self, other: &RelativeCallback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RelativeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RelativeCallback(..)")
    }
}

/// Graph-level entity. `id` always equals the wrapped person id or union id.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(flatten)]
    pub data: NodeData,
    pub position: Position,
    /// Set only on person nodes, by the orchestrator after layout.
    #[serde(skip)]
    pub on_add_relative: Option<RelativeCallback>,
}

impl TreeNode {
    pub fn person(person: Person) -> Self {
        Self {
            id: person.id.clone(),
            data: NodeData::Person(person),
            position: Position::ORIGIN,
            on_add_relative: None,
        }
    }

    pub fn union(union: Union) -> Self {
        Self {
            id: union.union_id.clone(),
            data: NodeData::Union(union),
            position: Position::ORIGIN,
            on_add_relative: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Person(_) => NodeKind::Person,
            NodeData::Union(_) => NodeKind::Union,
        }
    }

    pub fn is_person(&self) -> bool {
        self.kind() == NodeKind::Person
    }

    pub fn as_person(&self) -> Option<&Person> {
        match &self.data {
            NodeData::Person(p) => Some(p),
            NodeData::Union(_) => None,
        }
    }

    pub fn as_union(&self) -> Option<&Union> {
        match &self.data {
            NodeData::Union(u) => Some(u),
            NodeData::Person(_) => None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let callbacks_match = match (&self.on_add_relative, &other.on_add_relative) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_as(b),
            _ => false,
        };
        self.id == other.id
            && self.data == other.data
            && self.position == other.position
            && callbacks_match
    }
}

/// How an edge came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Partner into their union node.
    Partner,
    /// Union node down to a child of that union.
    Offspring,
    /// Direct parent to child, for parents without any union.
    Parent,
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl TreeEdge {
    /// Edge with the deterministic `"<source>-<target>"` id.
    pub fn between(source: &str, target: &str, kind: EdgeKind) -> Self {
        Self {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind,
        }
    }
}

/// A node/edge pair as produced by the builder and the filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<TreeNode>, edges: Vec<TreeEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
