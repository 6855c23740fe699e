//! The boundary to the graph database driver
//!
//! The crate never opens sessions or transactions itself. A driver adapter
//! implements [`CypherExecutor`], runs the `(text, parameters)` pairs it is
//! given and hydrates native driver values into [`Record`]s.

use async_trait::async_trait;

use crate::cypher_generator::Parameters;
use crate::graph_model::Record;

use super::errors::ExecutorError;

/// Update statistics of a write statement, as reported by the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounters {
    pub nodes_created: u64,
    pub nodes_deleted: u64,
    pub relationships_created: u64,
    pub relationships_deleted: u64,
    pub properties_set: u64,
}

/// Result of a write statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOutcome {
    pub records: Vec<Record>,
    pub counters: WriteCounters,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Run a read statement
    async fn execute(
        &self,
        cypher: &str,
        parameters: &Parameters,
    ) -> Result<Vec<Record>, ExecutorError>;

    /// Run a write statement in its own write transaction
    async fn execute_write(
        &self,
        cypher: &str,
        parameters: &Parameters,
    ) -> Result<WriteOutcome, ExecutorError>;
}
