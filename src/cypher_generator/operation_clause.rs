//! Tail clauses appended after MATCH/WHERE
//!
//! An operation clause only sees the aliases the MATCH clause introduced,
//! never the patterns themselves. There are exactly four of them:
//!
//! - `Return`: projection, ORDER BY, SKIP, LIMIT
//! - `Set`: bulk property update of one target alias
//! - `Delete`: bulk removal of one target alias (nodes are always detached)
//! - `Count`: `RETURN count(...)`
//!
//! Degenerate input (no target alias, nothing to set) yields an empty clause
//! rather than an error.

use serde_json::json;

use crate::graph_model::{Order, Properties, Query, ReturnItem};

use super::common::quote_identifier;
use super::params::ParamBinder;
use super::pattern::{AliasKind, EdgeBinding, IntroducedAlias};

/// Parameter names for paging. A statement has at most one of each.
pub const SKIP_PARAM: &str = "skip";
pub const LIMIT_PARAM: &str = "limit";

/// Which introduced alias a mutating clause acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// First node alias, i.e. the primary node of the first pattern
    FirstNode,
    /// First edge alias. Anonymous edges get bound so there is one.
    FirstEdge,
    /// A specific alias from the MATCH clause
    Alias(&'a str),
}

impl Target<'_> {
    fn resolve<'s>(&self, aliases: &'s [IntroducedAlias]) -> Option<&'s IntroducedAlias> {
        match self {
            Target::FirstNode => aliases.iter().find(|a| a.kind == AliasKind::Node),
            Target::FirstEdge => aliases.iter().find(|a| a.kind == AliasKind::Edge),
            Target::Alias(name) => aliases.iter().find(|a| a.name == *name),
        }
    }
}

/// RETURN projection with ordering and paging
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projection<'a> {
    pub items: &'a [ReturnItem],
    pub order_by: &'a [Order],
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl<'a> Projection<'a> {
    /// Take the projection part of a query
    pub fn of(query: &'a Query) -> Self {
        Self {
            items: &query.return_items,
            order_by: &query.order_by,
            skip: query.skip,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationClause<'a> {
    Return(Projection<'a>),
    Set {
        target: Target<'a>,
        properties: &'a Properties,
    },
    Delete {
        target: Target<'a>,
    },
    Count {
        /// Counted alias; falls back to the primary alias, then `*`
        alias: Option<&'a str>,
    },
}

impl<'a> OperationClause<'a> {
    /// Anonymous edges only need a variable when the clause acts on edges.
    pub fn edge_binding(&self) -> EdgeBinding {
        match self {
            OperationClause::Set {
                target: Target::FirstEdge,
                ..
            }
            | OperationClause::Delete {
                target: Target::FirstEdge,
            } => EdgeBinding::Always,
            _ => EdgeBinding::Named,
        }
    }

    /// Render the clause text, binding its values into the binder the MATCH and
    /// WHERE clauses of the same statement used. Empty for degenerate input.
    pub fn render(&self, aliases: &[IntroducedAlias], binder: &mut ParamBinder) -> String {
        match self {
            OperationClause::Return(projection) => render_return(projection, aliases, binder),
            OperationClause::Set { target, properties } => {
                render_set(target, properties, aliases, binder)
            }
            OperationClause::Delete { target } => render_delete(target, aliases),
            OperationClause::Count { alias } => render_count(*alias, aliases),
        }
    }
}

fn render_return(
    projection: &Projection<'_>,
    aliases: &[IntroducedAlias],
    binder: &mut ParamBinder,
) -> String {
    let items: Vec<String> = if projection.items.is_empty() {
        aliases.iter().map(|a| a.name.clone()).collect()
    } else {
        projection
            .items
            .iter()
            .map(|item| match item.alias.as_deref() {
                Some(alias) if !alias.is_empty() => format!("{} AS {}", item.expression, alias),
                _ => item.expression.clone(),
            })
            .collect()
    };
    if items.is_empty() {
        log::warn!("Nothing to project: no return items and no aliases in MATCH");
        return String::new();
    }

    let mut text = format!("RETURN {}", items.join(", "));

    if !projection.order_by.is_empty() {
        let keys: Vec<String> = projection
            .order_by
            .iter()
            .map(|order| {
                let direction = if order.asc { "ASC" } else { "DESC" };
                if order.property.is_empty() {
                    format!("{} {}", order.alias, direction)
                } else {
                    format!("{}.{} {}", order.alias, order.property, direction)
                }
            })
            .collect();
        text.push_str(" ORDER BY ");
        text.push_str(&keys.join(", "));
    }

    // Bound names always contain `_`, so these two can't be taken already.
    if let Some(skip) = projection.skip {
        let name = binder.bind_fixed(SKIP_PARAM, json!(skip));
        text.push_str(&format!(" SKIP ${}", name));
    }
    if let Some(limit) = projection.limit {
        let name = binder.bind_fixed(LIMIT_PARAM, json!(limit));
        text.push_str(&format!(" LIMIT ${}", name));
    }

    text
}

fn render_set(
    target: &Target<'_>,
    properties: &Properties,
    aliases: &[IntroducedAlias],
    binder: &mut ParamBinder,
) -> String {
    if properties.is_empty() {
        return String::new();
    }
    let Some(target) = target.resolve(aliases) else {
        log::warn!("SET has no target alias among {:?}, skipping", aliases);
        return String::new();
    };

    let assignments: Vec<String> = properties
        .iter()
        .map(|(key, value)| {
            let param = binder.bind(&format!("set_{}_{}", target.name, key), value.clone());
            format!("{}.{} = ${}", target.name, quote_identifier(key), param)
        })
        .collect();

    format!("SET {}", assignments.join(", "))
}

fn render_delete(target: &Target<'_>, aliases: &[IntroducedAlias]) -> String {
    match target.resolve(aliases) {
        Some(IntroducedAlias {
            name,
            kind: AliasKind::Node,
        }) => format!("DETACH DELETE {}", name),
        Some(IntroducedAlias {
            name,
            kind: AliasKind::Edge,
        }) => format!("DELETE {}", name),
        None => {
            log::warn!("DELETE has no target alias among {:?}, skipping", aliases);
            String::new()
        }
    }
}

fn render_count(alias: Option<&str>, aliases: &[IntroducedAlias]) -> String {
    let counted = alias
        .filter(|a| !a.is_empty())
        .or_else(|| aliases.first().map(|a| a.name.as_str()))
        .unwrap_or("*");
    format!("RETURN count({})", counted)
}
