//! Graph database client built on the Cypher compiler
//!
//! [`GraphClient`] is the operation surface; [`Neo4jClient`] implements it
//! on top of any [`CypherExecutor`].

mod bulk_writer;
mod errors;
mod executor;
mod neo4j_client;

pub use bulk_writer::{BulkSummary, BulkWriter};
pub use errors::{ExecutorError, GraphClientError};
#[cfg(test)]
pub use executor::MockCypherExecutor;
pub use executor::{CypherExecutor, WriteCounters, WriteOutcome};
pub use neo4j_client::{GraphClient, Neo4jClient};
