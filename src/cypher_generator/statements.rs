//! Fixed-shape statements: single-entity CRUD by element id, schema DDL,
//! content-matched edge creation and UNWIND bulk loads.
//!
//! These don't go through [`super::compiler::compile`]; their shape doesn't
//! depend on a [`crate::graph_model::Query`].

use serde_json::{json, Value};

use crate::graph_model::{ConstraintType, Edge, Node, NodeSelector, Properties};

use super::common::{quote_identifier, quote_name, render_node_labels};
use super::compiler::CompiledQuery;
use super::errors::StatementError;
use super::params::{ParamBinder, Parameters};
use super::pattern::render_node_selector;

fn params_of<const N: usize>(entries: [(&str, Value); N]) -> Parameters {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn edge_type(label: &str) -> String {
    format!(":{}", quote_name(label))
}

pub fn create_node(node: &Node) -> CompiledQuery {
    CompiledQuery::new(
        format!("CREATE (n{} $props) RETURN n", render_node_labels(&node.labels)),
        params_of([("props", Value::Object(node.properties.clone()))]),
    )
}

pub fn get_node(node_id: &str) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH (n) WHERE elementId(n) = $id RETURN n",
        params_of([("id", json!(node_id))]),
    )
}

/// Merges `properties` into the node; properties not mentioned are kept.
pub fn update_node(node_id: &str, properties: &Properties) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH (n) WHERE elementId(n) = $id SET n += $props",
        params_of([
            ("id", json!(node_id)),
            ("props", Value::Object(properties.clone())),
        ]),
    )
}

pub fn delete_node(node_id: &str) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH (n) WHERE elementId(n) = $id DETACH DELETE n",
        params_of([("id", json!(node_id))]),
    )
}

pub fn create_edge(edge: &Edge) -> CompiledQuery {
    CompiledQuery::new(
        format!(
            "MATCH (a), (b) WHERE elementId(a) = $source_id AND elementId(b) = $target_id \
             CREATE (a)-[r{} $props]->(b) RETURN r",
            edge_type(&edge.label)
        ),
        params_of([
            ("source_id", json!(edge.source_node_id)),
            ("target_id", json!(edge.target_node_id)),
            ("props", Value::Object(edge.properties.clone())),
        ]),
    )
}

/// Create `(a)-[r:label]->(b)` between every pair of nodes matching the two selectors.
pub fn create_edge_between(
    source: &NodeSelector,
    target: &NodeSelector,
    label: &str,
    properties: &Properties,
) -> CompiledQuery {
    let mut binder = ParamBinder::new();
    let source_text = render_node_selector("a", source, &mut binder);
    let target_text = render_node_selector("b", target, &mut binder);
    let props = binder.bind("props", Value::Object(properties.clone()));

    CompiledQuery::new(
        format!(
            "MATCH {}, {} CREATE (a)-[r{} ${}]->(b) RETURN r",
            source_text,
            target_text,
            edge_type(label),
            props
        ),
        binder.into_params(),
    )
}

pub fn get_edge(edge_id: &str) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH ()-[r]->() WHERE elementId(r) = $id RETURN r",
        params_of([("id", json!(edge_id))]),
    )
}

pub fn update_edge(edge_id: &str, properties: &Properties) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH ()-[r]->() WHERE elementId(r) = $id SET r += $props",
        params_of([
            ("id", json!(edge_id)),
            ("props", Value::Object(properties.clone())),
        ]),
    )
}

pub fn delete_edge(edge_id: &str) -> CompiledQuery {
    CompiledQuery::new(
        "MATCH ()-[r]->() WHERE elementId(r) = $id DELETE r",
        params_of([("id", json!(edge_id))]),
    )
}

/// Deterministic schema object name, e.g. `idx_Person_name_age`.
///
/// ASCII letters are kept as they are, any other character becomes `_`
/// followed by its decimal code point, and parts are joined with a bare `_`.
/// An `_` followed by a digit is always an escape, so distinct inputs never
/// share a name.
fn schema_name(prefix: &str, label: &str, properties: &[String]) -> String {
    let mut name = prefix.to_string();
    for part in std::iter::once(label).chain(properties.iter().map(String::as_str)) {
        name.push('_');
        for c in part.chars() {
            if c.is_ascii_alphabetic() {
                name.push(c);
            } else {
                name.push_str(&format!("_{}", c as u32));
            }
        }
    }
    name
}

fn check_index_args(label: &str, properties: &[String]) -> Result<(), StatementError> {
    if label.is_empty() {
        return Err(StatementError::EmptyName("label"));
    }
    if properties.is_empty() {
        return Err(StatementError::EmptyIndexProperties {
            label: label.to_string(),
        });
    }
    Ok(())
}

fn property_list(variable: &str, properties: &[String]) -> String {
    properties
        .iter()
        .map(|p| format!("{}.{}", variable, quote_identifier(p)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn create_node_index(
    label: &str,
    properties: &[String],
) -> Result<CompiledQuery, StatementError> {
    check_index_args(label, properties)?;
    Ok(CompiledQuery::new(
        format!(
            "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON ({})",
            schema_name("idx", label, properties),
            quote_name(label),
            property_list("n", properties)
        ),
        Parameters::new(),
    ))
}

pub fn drop_node_index(
    label: &str,
    properties: &[String],
) -> Result<CompiledQuery, StatementError> {
    check_index_args(label, properties)?;
    Ok(CompiledQuery::new(
        format!("DROP INDEX {} IF EXISTS", schema_name("idx", label, properties)),
        Parameters::new(),
    ))
}

pub fn create_edge_index(
    label: &str,
    properties: &[String],
) -> Result<CompiledQuery, StatementError> {
    check_index_args(label, properties)?;
    Ok(CompiledQuery::new(
        format!(
            "CREATE INDEX {} IF NOT EXISTS FOR ()-[r:{}]-() ON ({})",
            schema_name("relidx", label, properties),
            quote_name(label),
            property_list("r", properties)
        ),
        Parameters::new(),
    ))
}

pub fn drop_edge_index(
    label: &str,
    properties: &[String],
) -> Result<CompiledQuery, StatementError> {
    check_index_args(label, properties)?;
    Ok(CompiledQuery::new(
        format!(
            "DROP INDEX {} IF EXISTS",
            schema_name("relidx", label, properties)
        ),
        Parameters::new(),
    ))
}

fn constraint_name(label: &str, property: &str, kind: ConstraintType) -> String {
    let prefix = match kind {
        ConstraintType::Unique => "uniq",
        ConstraintType::Exists => "exists",
    };
    schema_name(prefix, label, &[property.to_string()])
}

fn check_constraint_args(label: &str, property: &str) -> Result<(), StatementError> {
    if label.is_empty() {
        return Err(StatementError::EmptyName("label"));
    }
    if property.is_empty() {
        return Err(StatementError::EmptyName("property"));
    }
    Ok(())
}

pub fn create_constraint(
    label: &str,
    property: &str,
    kind: ConstraintType,
) -> Result<CompiledQuery, StatementError> {
    check_constraint_args(label, property)?;
    let requirement = match kind {
        ConstraintType::Unique => "IS UNIQUE",
        ConstraintType::Exists => "IS NOT NULL",
    };
    Ok(CompiledQuery::new(
        format!(
            "CREATE CONSTRAINT {} IF NOT EXISTS FOR (n:{}) REQUIRE n.{} {}",
            constraint_name(label, property, kind),
            quote_name(label),
            quote_identifier(property),
            requirement
        ),
        Parameters::new(),
    ))
}

pub fn drop_constraint(
    label: &str,
    property: &str,
    kind: ConstraintType,
) -> Result<CompiledQuery, StatementError> {
    check_constraint_args(label, property)?;
    Ok(CompiledQuery::new(
        format!(
            "DROP CONSTRAINT {} IF EXISTS",
            constraint_name(label, property, kind)
        ),
        Parameters::new(),
    ))
}

/// One `CREATE` per row, every node getting the same labels.
/// Each row is the property map of one node.
pub fn bulk_create_nodes(labels: &[String], rows: Vec<Value>) -> CompiledQuery {
    CompiledQuery::new(
        format!(
            "UNWIND $rows AS row CREATE (n{}) SET n = row",
            render_node_labels(labels)
        ),
        params_of([("rows", Value::Array(rows))]),
    )
}

/// Row shape for [`bulk_create_edges`]
pub fn edge_row(edge: &Edge) -> Value {
    json!({
        "source_id": edge.source_node_id,
        "target_id": edge.target_node_id,
        "properties": Value::Object(edge.properties.clone()),
    })
}

/// One relationship per row, all of type `label`. Rows come from [`edge_row`].
pub fn bulk_create_edges(label: &str, rows: Vec<Value>) -> CompiledQuery {
    CompiledQuery::new(
        format!(
            "UNWIND $rows AS row MATCH (a), (b) \
             WHERE elementId(a) = row.source_id AND elementId(b) = row.target_id \
             CREATE (a)-[r{}]->(b) SET r = row.properties",
            edge_type(label)
        ),
        params_of([("rows", Value::Array(rows))]),
    )
}
