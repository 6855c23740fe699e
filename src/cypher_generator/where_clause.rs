//! WHERE clause rendering
//!
//! Groups are rendered in a fixed order (filter, must, should, must_not).
//! The order matters: it decides which condition gets the un-suffixed
//! parameter name when two conditions share `alias_property`.

use crate::graph_model::{Condition, Operator, Where};

use super::params::ParamBinder;

/// Cypher token for a comparison operator
pub fn operator_token(op: Operator) -> &'static str {
    match op {
        Operator::Equal => "=",
        Operator::NotEqual => "<>",
        Operator::GreaterThan => ">",
        Operator::GreaterThanOrEqual => ">=",
        Operator::LessThan => "<",
        Operator::LessThanOrEqual => "<=",
        Operator::In => "IN",
        Operator::Contains => "CONTAINS",
    }
}

/// `alias.property <op> $alias_property`, binding the value.
pub fn render_condition(condition: &Condition, binder: &mut ParamBinder) -> String {
    let base = format!("{}_{}", condition.alias, condition.property);
    let param = binder.bind(&base, condition.value.clone());
    format!(
        "{}.{} {} ${}",
        condition.alias,
        condition.property,
        operator_token(condition.operator),
        param
    )
}

fn render_group(conditions: &[Condition], joiner: &str, binder: &mut ParamBinder) -> String {
    conditions
        .iter()
        .map(|c| render_condition(c, binder))
        .collect::<Vec<_>>()
        .join(joiner)
}

/// Render the WHERE clause, or an empty string when every group is empty.
pub fn render_where(where_clause: &Where, binder: &mut ParamBinder) -> String {
    let mut groups: Vec<String> = Vec::new();

    if !where_clause.filter.is_empty() {
        groups.push(render_group(&where_clause.filter, " AND ", binder));
    }
    if !where_clause.must.is_empty() {
        groups.push(format!(
            "({})",
            render_group(&where_clause.must, " AND ", binder)
        ));
    }
    if !where_clause.should.is_empty() {
        groups.push(format!(
            "({})",
            render_group(&where_clause.should, " OR ", binder)
        ));
    }
    if !where_clause.must_not.is_empty() {
        groups.push(format!(
            "NOT ({})",
            render_group(&where_clause.must_not, " AND ", binder)
        ));
    }

    if groups.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", groups.join(" AND "))
    }
}
