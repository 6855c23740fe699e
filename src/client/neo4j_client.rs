use std::collections::HashSet;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::cypher_generator::{
    compile_count, compile_delete, compile_return, compile_set, statements, CompiledQuery, Target,
};
use crate::graph_model::{
    ConstraintType, Edge, Node, NodeSelector, Properties, Query, QueryResult, Record, ResultEntity,
};

use super::bulk_writer::BulkWriter;
use super::errors::GraphClientError;
use super::executor::{CypherExecutor, WriteOutcome};

type Result<T> = std::result::Result<T, GraphClientError>;

/// Operations offered on top of a graph database
#[async_trait]
pub trait GraphClient: Send + Sync {
    // --- Nodes ---
    async fn create_node(&self, node: &Node) -> Result<Option<Node>>;
    async fn get_node(&self, node_id: &str) -> Result<Option<Node>>;
    async fn update_node(&self, node_id: &str, properties: &Properties) -> Result<()>;
    async fn delete_node(&self, node_id: &str) -> Result<()>;

    // --- Edges ---
    async fn create_edge(&self, edge: &Edge) -> Result<Option<Edge>>;
    /// Connect every node matching `source` to every node matching `target`.
    async fn create_edge_between(
        &self,
        source: &NodeSelector,
        target: &NodeSelector,
        label: &str,
        properties: &Properties,
    ) -> Result<Vec<Edge>>;
    async fn get_edge(&self, edge_id: &str) -> Result<Option<Edge>>;
    async fn update_edge(&self, edge_id: &str, properties: &Properties) -> Result<()>;
    async fn delete_edge(&self, edge_id: &str) -> Result<()>;

    // --- Queries ---
    async fn query(&self, query: &Query) -> Result<QueryResult>;
    /// Nodes in the result, deduplicated by id, in first-seen order
    async fn find_nodes(&self, query: &Query) -> Result<Vec<Node>>;
    /// Edges in the result, deduplicated by id, in first-seen order
    async fn find_edges(&self, query: &Query) -> Result<Vec<Edge>>;
    async fn count(&self, query: &Query) -> Result<i64>;

    // --- Schema ---
    async fn create_node_index(&self, label: &str, properties: &[String]) -> Result<()>;
    async fn create_edge_index(&self, label: &str, properties: &[String]) -> Result<()>;
    async fn create_constraint(
        &self,
        label: &str,
        property: &str,
        kind: ConstraintType,
    ) -> Result<()>;
    async fn drop_node_index(&self, label: &str, properties: &[String]) -> Result<()>;
    async fn drop_edge_index(&self, label: &str, properties: &[String]) -> Result<()>;
    async fn drop_constraint(&self, label: &str, property: &str, kind: ConstraintType)
        -> Result<()>;

    // --- Bulk by query ---
    /// Returns the number of nodes updated
    async fn update_nodes_by_query(&self, query: &Query, properties: &Properties) -> Result<u64>;
    /// Returns the number of edges updated
    async fn update_edges_by_query(&self, query: &Query, properties: &Properties) -> Result<u64>;
    /// Returns the number of nodes deleted
    async fn delete_nodes_by_query(&self, query: &Query) -> Result<u64>;
    /// Returns the number of edges deleted
    async fn delete_edges_by_query(&self, query: &Query) -> Result<u64>;

    fn new_bulk_writer(&self) -> BulkWriter<'_>;
}

/// [`GraphClient`] for Neo4j-compatible databases
pub struct Neo4jClient<E> {
    executor: E,
    bulk_batch_size: usize,
}

impl<E: CypherExecutor> Neo4jClient<E> {
    pub fn new(executor: E, config: &ClientConfig) -> Self {
        Self {
            executor,
            bulk_batch_size: config.bulk_batch_size,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn read(&self, stmt: &CompiledQuery) -> Result<Vec<Record>> {
        log::debug!("Executing read: {}", stmt.text);
        Ok(self.executor.execute(&stmt.text, &stmt.parameters).await?)
    }

    async fn write(&self, stmt: &CompiledQuery) -> Result<WriteOutcome> {
        log::debug!("Executing write: {}", stmt.text);
        Ok(self
            .executor
            .execute_write(&stmt.text, &stmt.parameters)
            .await?)
    }
}

fn first_node(records: &[Record], key: &str) -> Option<Node> {
    records
        .first()
        .and_then(|r| r.get(key))
        .and_then(ResultEntity::as_node)
        .cloned()
}

fn first_edge(records: &[Record], key: &str) -> Option<Edge> {
    records
        .first()
        .and_then(|r| r.get(key))
        .and_then(ResultEntity::as_edge)
        .cloned()
}

/// Entities picked from every column of every record, first occurrence of each id kept
fn dedup_by_id<T, F>(records: &[Record], pick: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&ResultEntity) -> Option<(&str, &T)>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        for entity in record.values() {
            if let Some((id, item)) = pick(entity) {
                if seen.insert(id) {
                    out.push(item.clone());
                }
            }
        }
    }
    out
}

/// Each matched entity gets every property exactly once.
fn entities_updated(outcome: &WriteOutcome, properties: &Properties) -> u64 {
    match properties.len() as u64 {
        0 => 0,
        per_entity => outcome.counters.properties_set / per_entity,
    }
}

#[async_trait]
impl<E: CypherExecutor> GraphClient for Neo4jClient<E> {
    async fn create_node(&self, node: &Node) -> Result<Option<Node>> {
        let outcome = self.write(&statements::create_node(node)).await?;
        Ok(first_node(&outcome.records, "n"))
    }

    async fn get_node(&self, node_id: &str) -> Result<Option<Node>> {
        let records = self.read(&statements::get_node(node_id)).await?;
        Ok(first_node(&records, "n"))
    }

    async fn update_node(&self, node_id: &str, properties: &Properties) -> Result<()> {
        self.write(&statements::update_node(node_id, properties))
            .await?;
        Ok(())
    }

    async fn delete_node(&self, node_id: &str) -> Result<()> {
        self.write(&statements::delete_node(node_id)).await?;
        Ok(())
    }

    async fn create_edge(&self, edge: &Edge) -> Result<Option<Edge>> {
        let outcome = self.write(&statements::create_edge(edge)).await?;
        Ok(first_edge(&outcome.records, "r"))
    }

    async fn create_edge_between(
        &self,
        source: &NodeSelector,
        target: &NodeSelector,
        label: &str,
        properties: &Properties,
    ) -> Result<Vec<Edge>> {
        let stmt = statements::create_edge_between(source, target, label, properties);
        let outcome = self.write(&stmt).await?;
        Ok(outcome
            .records
            .iter()
            .filter_map(|r| r.get("r").and_then(ResultEntity::as_edge).cloned())
            .collect())
    }

    async fn get_edge(&self, edge_id: &str) -> Result<Option<Edge>> {
        let records = self.read(&statements::get_edge(edge_id)).await?;
        Ok(first_edge(&records, "r"))
    }

    async fn update_edge(&self, edge_id: &str, properties: &Properties) -> Result<()> {
        self.write(&statements::update_edge(edge_id, properties))
            .await?;
        Ok(())
    }

    async fn delete_edge(&self, edge_id: &str) -> Result<()> {
        self.write(&statements::delete_edge(edge_id)).await?;
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<QueryResult> {
        let records = self.read(&compile_return(query)).await?;
        Ok(QueryResult { records })
    }

    async fn find_nodes(&self, query: &Query) -> Result<Vec<Node>> {
        let result = self.query(query).await?;
        Ok(dedup_by_id(&result.records, |entity| {
            entity.as_node().map(|n| (n.id.as_str(), n))
        }))
    }

    async fn find_edges(&self, query: &Query) -> Result<Vec<Edge>> {
        let result = self.query(query).await?;
        Ok(dedup_by_id(&result.records, |entity| {
            entity.as_edge().map(|e| (e.id.as_str(), e))
        }))
    }

    async fn count(&self, query: &Query) -> Result<i64> {
        let records = self.read(&compile_count(query)).await?;
        let Some(record) = records.first() else {
            return Ok(0);
        };
        let count = record
            .values()
            .next()
            .and_then(ResultEntity::as_value)
            .and_then(|v| v.as_i64());
        count.ok_or_else(|| {
            GraphClientError::UnexpectedResult(format!(
                "count returned a non-integer row: {:?}",
                record
            ))
        })
    }

    async fn create_node_index(&self, label: &str, properties: &[String]) -> Result<()> {
        self.write(&statements::create_node_index(label, properties)?)
            .await?;
        Ok(())
    }

    async fn create_edge_index(&self, label: &str, properties: &[String]) -> Result<()> {
        self.write(&statements::create_edge_index(label, properties)?)
            .await?;
        Ok(())
    }

    async fn create_constraint(
        &self,
        label: &str,
        property: &str,
        kind: ConstraintType,
    ) -> Result<()> {
        self.write(&statements::create_constraint(label, property, kind)?)
            .await?;
        Ok(())
    }

    async fn drop_node_index(&self, label: &str, properties: &[String]) -> Result<()> {
        self.write(&statements::drop_node_index(label, properties)?)
            .await?;
        Ok(())
    }

    async fn drop_edge_index(&self, label: &str, properties: &[String]) -> Result<()> {
        self.write(&statements::drop_edge_index(label, properties)?)
            .await?;
        Ok(())
    }

    async fn drop_constraint(
        &self,
        label: &str,
        property: &str,
        kind: ConstraintType,
    ) -> Result<()> {
        self.write(&statements::drop_constraint(label, property, kind)?)
            .await?;
        Ok(())
    }

    async fn update_nodes_by_query(&self, query: &Query, properties: &Properties) -> Result<u64> {
        let stmt = compile_set(query, Target::FirstNode, properties);
        if !stmt.has_operation() {
            log::info!("Node update has nothing to set, skipping");
            return Ok(0);
        }
        let outcome = self.write(&stmt).await?;
        Ok(entities_updated(&outcome, properties))
    }

    async fn update_edges_by_query(&self, query: &Query, properties: &Properties) -> Result<u64> {
        let stmt = compile_set(query, Target::FirstEdge, properties);
        if !stmt.has_operation() {
            log::info!("Edge update has nothing to set, skipping");
            return Ok(0);
        }
        let outcome = self.write(&stmt).await?;
        Ok(entities_updated(&outcome, properties))
    }

    async fn delete_nodes_by_query(&self, query: &Query) -> Result<u64> {
        let stmt = compile_delete(query, Target::FirstNode);
        if !stmt.has_operation() {
            log::info!("Node delete has no target, skipping");
            return Ok(0);
        }
        Ok(self.write(&stmt).await?.counters.nodes_deleted)
    }

    async fn delete_edges_by_query(&self, query: &Query) -> Result<u64> {
        let stmt = compile_delete(query, Target::FirstEdge);
        if !stmt.has_operation() {
            log::info!("Edge delete has no target, skipping");
            return Ok(0);
        }
        Ok(self.write(&stmt).await?.counters.relationships_deleted)
    }

    fn new_bulk_writer(&self) -> BulkWriter<'_> {
        BulkWriter::new(&self.executor, self.bulk_batch_size)
    }
}
