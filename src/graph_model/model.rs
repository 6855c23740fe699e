use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key/value attributes of nodes and edges.
///
/// Backed by serde_json's insertion-ordered map, so rendering the same
/// properties twice always yields the same text.
pub type Properties = serde_json::Map<String, Value>;

/// A node (vertex) in the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Database-assigned element id. Empty for nodes not yet persisted.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: String::new(),
            labels: labels.into_iter().map(Into::into).collect(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// An edge (relationship) between two nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub id: String,
    /// Relationship type, e.g. `KNOWS`
    pub label: String,
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    pub fn new(
        label: impl Into<String>,
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Alternating sequence of nodes and edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// One value in a result row: a graph entity or a plain scalar/list/map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultEntity {
    Node(Node),
    Edge(Edge),
    Path(Path),
    Value(Value),
}

impl ResultEntity {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            ResultEntity::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            ResultEntity::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResultEntity::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for ResultEntity {
    fn from(value: Value) -> Self {
        ResultEntity::Value(value)
    }
}

impl From<Node> for ResultEntity {
    fn from(node: Node) -> Self {
        ResultEntity::Node(node)
    }
}

impl From<Edge> for ResultEntity {
    fn from(edge: Edge) -> Self {
        ResultEntity::Edge(edge)
    }
}

/// A single result row. Column order is the order the database returned them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, ResultEntity)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for executors and tests
    pub fn with(mut self, key: impl Into<String>, entity: impl Into<ResultEntity>) -> Self {
        self.insert(key, entity);
        self
    }

    /// Insert a column, replacing the value of an existing column with the same key.
    pub fn insert(&mut self, key: impl Into<String>, entity: impl Into<ResultEntity>) {
        let key = key.into();
        let entity = entity.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entity,
            None => self.fields.push((key, entity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResultEntity> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ResultEntity> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultEntity)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Rows returned by a read query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub records: Vec<Record>,
}

/// Schema constraint kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstraintType {
    /// Property value is unique across all nodes with the label
    Unique,
    /// Property must be present on every node with the label
    Exists,
}
