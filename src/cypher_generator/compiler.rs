//! Query compiler: MATCH + WHERE + one operation clause
//!
//! The MATCH/WHERE prefix is generated here and nowhere else; the four
//! query-driven operations only differ in the [`OperationClause`] they pass.

use serde::Serialize;

use crate::graph_model::{Properties, Query};

use super::operation_clause::{OperationClause, Projection, Target};
use super::params::{ParamBinder, Parameters};
use super::pattern::render_match;
use super::where_clause::render_where;

/// Cypher text plus the parameters its `$name` placeholders refer to
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledQuery {
    #[serde(rename = "cypher")]
    pub text: String,
    pub parameters: Parameters,
    #[serde(skip)]
    has_operation: bool,
}

impl CompiledQuery {
    /// A statement whose text is complete as given (no MATCH/WHERE prefix generation).
    pub fn new(text: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            text: text.into(),
            parameters,
            has_operation: true,
        }
    }

    /// False when the operation clause came out empty (nothing to set, no
    /// target to delete, nothing to project). Executing such a statement
    /// would at best be a no-op.
    pub fn has_operation(&self) -> bool {
        self.has_operation
    }
}

/// Compile `query` with the given operation clause.
///
/// Pure: identical input gives identical text and parameter order.
pub fn compile(query: &Query, operation: &OperationClause<'_>) -> CompiledQuery {
    let mut binder = ParamBinder::new();

    let match_clause = render_match(&query.patterns, operation.edge_binding(), &mut binder);
    let where_text = query
        .where_clause
        .as_ref()
        .map(|w| render_where(w, &mut binder))
        .unwrap_or_default();
    let tail = operation.render(&match_clause.aliases, &mut binder);

    let text = [match_clause.text.as_str(), where_text.as_str(), tail.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let parameters = binder.into_params();

    log::debug!(
        "Compiled cypher: {} (params: {:?})",
        text,
        parameters.keys().collect::<Vec<_>>()
    );

    CompiledQuery {
        text,
        parameters,
        has_operation: !tail.is_empty(),
    }
}

/// `MATCH ... [WHERE ...] RETURN ... [ORDER BY] [SKIP] [LIMIT]`
pub fn compile_return(query: &Query) -> CompiledQuery {
    compile(query, &OperationClause::Return(Projection::of(query)))
}

/// `MATCH ... [WHERE ...] RETURN count(primary)`
pub fn compile_count(query: &Query) -> CompiledQuery {
    compile(query, &OperationClause::Count { alias: None })
}

/// `MATCH ... [WHERE ...] SET target.k = $v, ...`
pub fn compile_set(query: &Query, target: Target<'_>, properties: &Properties) -> CompiledQuery {
    compile(query, &OperationClause::Set { target, properties })
}

/// `MATCH ... [WHERE ...] [DETACH] DELETE target`
pub fn compile_delete(query: &Query, target: Target<'_>) -> CompiledQuery {
    compile(query, &OperationClause::Delete { target })
}
