//! Buffered node/edge creation.
//!
//! Nodes are grouped by label set and edges by type, then written with one
//! `UNWIND` statement per group and chunk. Nodes always go first so edges
//! buffered in the same batch can reference them.

use serde::Serialize;
use serde_json::Value;

use crate::cypher_generator::statements;
use crate::graph_model::{Edge, Node};

use super::errors::GraphClientError;
use super::executor::CypherExecutor;

/// What a flush wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub nodes_created: u64,
    pub edges_created: u64,
}

impl std::ops::AddAssign for BulkSummary {
    fn add_assign(&mut self, other: Self) {
        self.nodes_created += other.nodes_created;
        self.edges_created += other.edges_created;
    }
}

pub struct BulkWriter<'a> {
    executor: &'a dyn CypherExecutor,
    batch_size: usize,
    nodes: Vec<(Vec<String>, Vec<Value>)>,
    edges: Vec<(String, Vec<Value>)>,
    pending: usize,
    written: BulkSummary,
}

impl<'a> BulkWriter<'a> {
    pub fn new(executor: &'a dyn CypherExecutor, batch_size: usize) -> Self {
        Self {
            executor,
            batch_size: batch_size.max(1),
            nodes: Vec::new(),
            edges: Vec::new(),
            pending: 0,
            written: BulkSummary::default(),
        }
    }

    /// Buffered entities not yet sent
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Totals over every flush so far
    pub fn written(&self) -> BulkSummary {
        self.written
    }

    pub async fn add_node(&mut self, node: &Node) -> Result<(), GraphClientError> {
        let row = Value::Object(node.properties.clone());
        match self.nodes.iter_mut().find(|(labels, _)| *labels == node.labels) {
            Some((_, rows)) => rows.push(row),
            None => self.nodes.push((node.labels.clone(), vec![row])),
        }
        self.buffered().await
    }

    pub async fn add_edge(&mut self, edge: &Edge) -> Result<(), GraphClientError> {
        let row = statements::edge_row(edge);
        match self.edges.iter_mut().find(|(label, _)| *label == edge.label) {
            Some((_, rows)) => rows.push(row),
            None => self.edges.push((edge.label.clone(), vec![row])),
        }
        self.buffered().await
    }

    async fn buffered(&mut self) -> Result<(), GraphClientError> {
        self.pending += 1;
        if self.pending >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Send everything buffered. Buffers are cleared even on error; chunks
    /// committed before the failing one still count towards [`Self::written`].
    pub async fn flush(&mut self) -> Result<BulkSummary, GraphClientError> {
        let nodes = std::mem::take(&mut self.nodes);
        let edges = std::mem::take(&mut self.edges);
        if self.pending == 0 {
            return Ok(BulkSummary::default());
        }
        log::debug!(
            "Flushing {} buffered entities ({} node groups, {} edge groups)",
            self.pending,
            nodes.len(),
            edges.len()
        );
        self.pending = 0;

        let mut summary = BulkSummary::default();
        for (labels, rows) in nodes {
            for chunk in rows.chunks(self.batch_size) {
                let stmt = statements::bulk_create_nodes(&labels, chunk.to_vec());
                let outcome = self
                    .executor
                    .execute_write(&stmt.text, &stmt.parameters)
                    .await?;
                let committed = BulkSummary {
                    nodes_created: outcome.counters.nodes_created,
                    edges_created: 0,
                };
                summary += committed;
                self.written += committed;
            }
        }
        for (label, rows) in edges {
            for chunk in rows.chunks(self.batch_size) {
                let stmt = statements::bulk_create_edges(&label, chunk.to_vec());
                let outcome = self
                    .executor
                    .execute_write(&stmt.text, &stmt.parameters)
                    .await?;
                let committed = BulkSummary {
                    nodes_created: 0,
                    edges_created: outcome.counters.relationships_created,
                };
                summary += committed;
                self.written += committed;
            }
        }

        log::info!(
            "Bulk write created {} nodes, {} edges",
            summary.nodes_created,
            summary.edges_created
        );
        Ok(summary)
    }

    /// Flush what is left and return the totals for the writer's lifetime.
    pub async fn close(mut self) -> Result<BulkSummary, GraphClientError> {
        self.flush().await?;
        Ok(self.written)
    }
}
