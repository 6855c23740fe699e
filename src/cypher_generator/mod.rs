//! Cypher generation
//!
//! `compiler::compile` turns a [`crate::graph_model::Query`] plus one
//! [`OperationClause`] into `(text, parameters)`. The pieces, leaf first:
//!
//! - `params`: collision-free parameter names
//! - `where_clause`: conditions and the four boolean groups
//! - `pattern`: MATCH patterns and content-matched node selectors
//! - `operation_clause`: RETURN / SET / DELETE / COUNT tails
//! - `statements`: fixed-shape CRUD, schema and bulk statements

pub mod common;
pub mod compiler;
mod errors;
pub mod operation_clause;
pub mod params;
pub mod pattern;
pub mod statements;
pub mod where_clause;

pub use compiler::{
    compile, compile_count, compile_delete, compile_return, compile_set, CompiledQuery,
};
pub use errors::StatementError;
pub use operation_clause::{OperationClause, Projection, Target};
pub use params::{ParamBinder, Parameters};
pub use pattern::{AliasKind, EdgeBinding, IntroducedAlias};
