//! Database-agnostic graph data model
//!
//! Two halves:
//! - `model`: entities as they come back from the database (nodes, edges, paths, records)
//! - `query`: the structured query description the Cypher compiler consumes
//!
//! Every type here is plain data. The compiler only ever reads these values.

pub mod model;
pub mod query;

pub use model::{ConstraintType, Edge, Node, Path, Properties, QueryResult, Record, ResultEntity};
pub use query::{
    Condition, EdgeDirection, EdgePattern, NodeSelector, Operator, Order, Pattern, Query,
    ReturnItem, Where,
};
