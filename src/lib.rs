//! Cypherforge - parameterized Cypher generation for graph databases
//!
//! This crate turns database-agnostic query descriptions into Cypher through:
//! - A serde-friendly query model (patterns, conditions, projections)
//! - A compiler emitting `MATCH ... WHERE ... <operation>` with bound parameters
//! - Fixed CRUD, schema and bulk statements
//! - A Neo4j client driving any [`client::CypherExecutor`]
//!
//! Values never appear in the generated text; they travel as `$name` parameters.

pub mod client;
pub mod config;
pub mod cypher_generator;
pub mod graph_model;
