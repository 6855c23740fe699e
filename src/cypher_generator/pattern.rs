//! MATCH pattern rendering
//!
//! Renders `(alias:`Label` {k: $alias_k})-[r:TYPE*min..max {k: $r_k}]->(m:`Label`)`
//! for each top-level pattern and records the aliases it introduced. That
//! alias list is all an operation clause gets to see of the MATCH part.
//!
//! Only one hop is rendered per pattern. Longer chains are expressed as
//! additional top-level patterns sharing aliases.

use crate::graph_model::query::{DEFAULT_EDGE_ALIAS, DEFAULT_FAR_NODE_ALIAS, DEFAULT_NODE_ALIAS};
use crate::graph_model::{EdgeDirection, EdgePattern, NodeSelector, Pattern, Properties};

use super::common::{quote_identifier, render_edge_types, render_node_labels};
use super::params::ParamBinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Node,
    Edge,
}

/// An alias bound by the MATCH clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroducedAlias {
    pub name: String,
    pub kind: AliasKind,
}

impl IntroducedAlias {
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AliasKind::Node,
        }
    }

    pub fn edge(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AliasKind::Edge,
        }
    }
}

/// Whether edges without an explicit alias get a variable in the pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeBinding {
    /// Anonymous edges stay anonymous: `-[:KNOWS]->`
    #[default]
    Named,
    /// Anonymous edges are bound to the default edge alias: `-[r:KNOWS]->`.
    /// Needed when the operation itself targets edges.
    Always,
}

/// Rendered MATCH clause
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchClause {
    /// `MATCH ...`, or empty when there were no patterns
    pub text: String,
    /// Primary node, edge (when bound), far node; per pattern, in order.
    /// A name bound twice is listed once, at its first occurrence.
    pub aliases: Vec<IntroducedAlias>,
}

impl MatchClause {
    pub fn first_node(&self) -> Option<&str> {
        self.aliases
            .iter()
            .find(|a| a.kind == AliasKind::Node)
            .map(|a| a.name.as_str())
    }

    pub fn first_edge(&self) -> Option<&str> {
        self.aliases
            .iter()
            .find(|a| a.kind == AliasKind::Edge)
            .map(|a| a.name.as_str())
    }
}

const NO_LABELS: &[String] = &[];

fn alias_or<'a>(alias: &'a str, default: &'a str) -> &'a str {
    if alias.is_empty() {
        default
    } else {
        alias
    }
}

fn introduce(aliases: &mut Vec<IntroducedAlias>, alias: IntroducedAlias) {
    if !aliases.iter().any(|a| a.name == alias.name) {
        aliases.push(alias);
    }
}

/// ` {k: $alias_k, ...}`, or empty for no properties.
fn render_properties(alias: &str, properties: &Properties, binder: &mut ParamBinder) -> String {
    if properties.is_empty() {
        return String::new();
    }
    let entries: Vec<String> = properties
        .iter()
        .map(|(key, value)| {
            let param = binder.bind(&format!("{}_{}", alias, key), value.clone());
            format!("{}: ${}", quote_identifier(key), param)
        })
        .collect();
    format!(" {{{}}}", entries.join(", "))
}

fn render_node(
    alias: &str,
    labels: &[String],
    properties: &Properties,
    binder: &mut ParamBinder,
) -> String {
    format!(
        "({}{}{})",
        alias,
        render_node_labels(labels),
        render_properties(alias, properties, binder)
    )
}

/// Variable-length suffix: `*N`, `*min..max`, `*min..`, `*..max`, or nothing.
pub fn render_hops(min_hops: Option<u32>, max_hops: Option<u32>) -> String {
    match (min_hops, max_hops) {
        (None, None) => String::new(),
        (Some(min), Some(max)) if min == max => format!("*{}", min),
        (Some(min), Some(max)) => format!("*{}..{}", min, max),
        (Some(min), None) => format!("*{}..", min),
        (None, Some(max)) => format!("*..{}", max),
    }
}

fn render_edge(
    edge: &EdgePattern,
    binding: EdgeBinding,
    binder: &mut ParamBinder,
    aliases: &mut Vec<IntroducedAlias>,
) -> String {
    let variable = match (edge.alias.is_empty(), binding) {
        (false, _) => edge.alias.as_str(),
        (true, EdgeBinding::Always) => DEFAULT_EDGE_ALIAS,
        (true, EdgeBinding::Named) => "",
    };
    if !variable.is_empty() {
        introduce(aliases, IntroducedAlias::edge(variable));
    }

    let body = format!(
        "{}{}{}{}",
        variable,
        render_edge_types(&edge.labels),
        render_hops(edge.min_hops, edge.max_hops),
        render_properties(
            alias_or(variable, DEFAULT_EDGE_ALIAS),
            &edge.properties,
            binder
        )
    );

    let (far_alias, far_labels) = match edge.node.as_deref() {
        Some(node) => (
            alias_or(&node.alias, DEFAULT_FAR_NODE_ALIAS),
            node.labels.as_slice(),
        ),
        None => (DEFAULT_FAR_NODE_ALIAS, NO_LABELS),
    };
    introduce(aliases, IntroducedAlias::node(far_alias));
    let far = format!("({}{})", far_alias, render_node_labels(far_labels));

    match edge.direction {
        EdgeDirection::Outgoing => format!("-[{}]->{}", body, far),
        EdgeDirection::Incoming => format!("<-[{}]-{}", body, far),
        EdgeDirection::Both => format!("-[{}]-{}", body, far),
    }
}

fn render_pattern(
    pattern: &Pattern,
    binding: EdgeBinding,
    binder: &mut ParamBinder,
    aliases: &mut Vec<IntroducedAlias>,
) -> String {
    let alias = alias_or(&pattern.alias, DEFAULT_NODE_ALIAS);
    introduce(aliases, IntroducedAlias::node(alias));

    let mut text = render_node(alias, &pattern.labels, &pattern.properties, binder);
    if let Some(edge) = pattern.edge.as_deref() {
        text.push_str(&render_edge(edge, binding, binder, aliases));
    }
    text
}

/// Render all top-level patterns as one MATCH clause.
pub fn render_match(
    patterns: &[Pattern],
    binding: EdgeBinding,
    binder: &mut ParamBinder,
) -> MatchClause {
    if patterns.is_empty() {
        return MatchClause::default();
    }

    let mut aliases = Vec::new();
    let rendered: Vec<String> = patterns
        .iter()
        .map(|p| render_pattern(p, binding, binder, &mut aliases))
        .collect();

    MatchClause {
        text: format!("MATCH {}", rendered.join(", ")),
        aliases,
    }
}

/// `(alias:`Label` {k: $alias_k})` for a content-matched endpoint.
pub fn render_node_selector(
    alias: &str,
    selector: &NodeSelector,
    binder: &mut ParamBinder,
) -> String {
    render_node(alias, &selector.labels, &selector.properties, binder)
}
