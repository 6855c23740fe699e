use thiserror::Error;

use crate::cypher_generator::StatementError;

/// Failure reported by the driver that executes statements.
///
/// The client passes these through untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutorError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Statement rejected [{code}]: {message}")]
    Query { code: String, message: String },

    #[error("Transaction failed: {0}")]
    Transaction(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphClientError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),
}
