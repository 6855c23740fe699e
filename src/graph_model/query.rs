//! Structured graph query description
//!
//! A [`Query`] says *what* to match (patterns), how to filter it (where groups),
//! and what to project (return items, ordering, paging). It carries no Cypher
//! text; `cypher_generator` turns it into a parameterized statement.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::Properties;

/// Alias given to a pattern's node when the caller leaves it empty
pub const DEFAULT_NODE_ALIAS: &str = "n";
/// Alias given to an edge when it has to be bound and the caller left it empty
pub const DEFAULT_EDGE_ALIAS: &str = "r";
/// Alias given to an edge's far endpoint when the caller leaves it empty
pub const DEFAULT_FAR_NODE_ALIAS: &str = "m";

/// A full graph query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Patterns to match, conjunctive, rendered in order
    #[serde(rename = "match", default)]
    pub patterns: Vec<Pattern>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Where>,
    /// Projection items, only used when the query is compiled for RETURN
    #[serde(rename = "return", default)]
    pub return_items: Vec<ReturnItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Query {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            ..Default::default()
        }
    }

    pub fn with_where(mut self, where_clause: Where) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    pub fn returning(mut self, item: ReturnItem) -> Self {
        self.return_items.push(item);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One node to match, optionally continued by a single edge to a second node,
/// e.g. `(n:Label)-[r:REL]->(m:Label)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Empty means [`DEFAULT_NODE_ALIAS`] (or [`DEFAULT_FAR_NODE_ALIAS`] as an edge endpoint)
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Inline equality filters, rendered inside the pattern braces
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<Box<EdgePattern>>,
}

impl Pattern {
    pub fn node<I, S>(alias: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alias: alias.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_edge(mut self, edge: EdgePattern) -> Self {
        self.edge = Some(Box::new(edge));
        self
    }
}

/// The edge part of a pattern. Only one hop is modeled: the far node's own
/// properties and edge are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgePattern {
    #[serde(default)]
    pub alias: String,
    /// Relationship types, matched disjunctively
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub direction: EdgeDirection,
    /// Lower bound of a variable-length match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_hops: Option<u32>,
    /// Upper bound of a variable-length match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u32>,
    /// Far endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Box<Pattern>>,
}

impl EdgePattern {
    pub fn new<I, S>(labels: I, direction: EdgeDirection) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            direction,
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_hops(mut self, min_hops: Option<u32>, max_hops: Option<u32>) -> Self {
        self.min_hops = min_hops;
        self.max_hops = max_hops;
        self
    }

    pub fn to_node(mut self, node: Pattern) -> Self {
        self.node = Some(Box::new(node));
        self
    }
}

/// Direction of an edge relative to the pattern's primary node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeDirection {
    /// `(a)-[]->(b)`; also the fallback for unrecognized direction tokens
    #[default]
    Outgoing,
    /// `(a)<-[]-(b)`
    Incoming,
    /// `(a)-[]-(b)`
    Both,
}

impl EdgeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeDirection::Outgoing => "->",
            EdgeDirection::Incoming => "<-",
            EdgeDirection::Both => "--",
        }
    }

    /// Strict parse, `None` for unknown tokens
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "->" | "out" | "outgoing" => Some(EdgeDirection::Outgoing),
            "<-" | "in" | "incoming" => Some(EdgeDirection::Incoming),
            "--" | "-" | "both" | "any" => Some(EdgeDirection::Both),
            _ => None,
        }
    }
}

impl From<String> for EdgeDirection {
    fn from(token: String) -> Self {
        EdgeDirection::parse(&token).unwrap_or_else(|| {
            log::warn!(
                "Unknown edge direction '{}', falling back to outgoing",
                token
            );
            EdgeDirection::default()
        })
    }
}

impl From<EdgeDirection> for String {
    fn from(direction: EdgeDirection) -> Self {
        direction.as_str().to_string()
    }
}

/// Filter conditions, grouped the way a boolean search query groups them.
///
/// Groups are combined with AND. An entirely empty `Where` renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Where {
    /// ANDed, not parenthesized
    #[serde(default)]
    pub filter: Vec<Condition>,
    /// ANDed, parenthesized
    #[serde(default)]
    pub must: Vec<Condition>,
    /// ORed, parenthesized
    #[serde(default)]
    pub should: Vec<Condition>,
    /// ANDed, parenthesized, negated
    #[serde(default)]
    pub must_not: Vec<Condition>,
}

impl Where {
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
    }
}

/// A single comparison of `alias.property` against a literal value.
///
/// `alias` and `property` are trusted identifiers from calling code; `value`
/// is always bound as a parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub alias: String,
    pub property: String,
    #[serde(default)]
    pub operator: Operator,
    pub value: Value,
}

impl Condition {
    pub fn new(
        alias: impl Into<String>,
        property: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            alias: alias.into(),
            property: property.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Also the fallback for unrecognized operator tokens
    #[default]
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// List membership
    In,
    /// Substring match
    Contains,
}

impl Operator {
    /// Token used in the serialized query description
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::In => "IN",
            Operator::Contains => "CONTAINS",
        }
    }

    /// Strict parse, `None` for unknown tokens
    pub fn parse(token: &str) -> Option<Self> {
        let op = match token.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Operator::Equal,
            "!=" | "<>" | "ne" | "neq" => Operator::NotEqual,
            ">" | "gt" => Operator::GreaterThan,
            ">=" | "gte" => Operator::GreaterThanOrEqual,
            "<" | "lt" => Operator::LessThan,
            "<=" | "lte" => Operator::LessThanOrEqual,
            "in" => Operator::In,
            "contains" => Operator::Contains,
            _ => return None,
        };
        Some(op)
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Operator::parse(&token).unwrap_or_else(|| {
            log::warn!("Unknown comparison operator '{}', falling back to '='", token);
            Operator::default()
        })
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// One projection in the RETURN clause
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnItem {
    /// A bound alias (`n`), a property (`n.name`) or a function call (`count(n)`)
    pub expression: String,
    /// Result column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ReturnItem {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    pub fn aliased(expression: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: Some(alias.into()),
        }
    }
}

/// Sort key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub alias: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub asc: bool,
}

impl Order {
    pub fn asc(alias: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            property: property.into(),
            asc: true,
        }
    }

    pub fn desc(alias: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            property: property.into(),
            asc: false,
        }
    }
}

/// Identifies an existing node by content instead of by element id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSelector {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl NodeSelector {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
