use thiserror::Error;

/// Fixed statements that can't be rendered from the given arguments.
///
/// Query compilation itself has no failure path; only schema statements can be
/// asked for something that has no valid Cypher form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatementError {
    #[error("Index on '{label}' needs at least one property")]
    EmptyIndexProperties { label: String },

    #[error("Schema statement needs a non-empty {0}")]
    EmptyName(&'static str),
}
