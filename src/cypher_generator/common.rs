//! Identifier quoting and parameter-name helpers shared by all renderers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLAIN_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid");
}

/// True when `name` can appear in Cypher without backtick quoting.
pub fn is_plain_identifier(name: &str) -> bool {
    PLAIN_IDENTIFIER.is_match(name)
}

/// Always backtick-quote a name, doubling embedded backticks.
///
/// Node labels go through here unconditionally so that a label can never
/// terminate the pattern it sits in.
pub fn quote_name(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Backtick-quote a name only when it isn't a plain identifier.
///
/// # Examples
/// ```
/// use cypherforge::cypher_generator::common::quote_identifier;
/// assert_eq!(quote_identifier("KNOWS"), "KNOWS");
/// assert_eq!(quote_identifier("first name"), "`first name`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        quote_name(name)
    }
}

/// `:`Label1`:`Label2`` in declaration order, duplicates skipped.
pub fn render_node_labels(labels: &[String]) -> String {
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            continue;
        }
        out.push(':');
        out.push_str(&quote_name(label));
    }
    out
}

/// `:T1|T2` in declaration order, duplicates skipped. Empty when there are no types.
pub fn render_edge_types(labels: &[String]) -> String {
    let mut types: Vec<String> = Vec::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            continue;
        }
        types.push(quote_identifier(label));
    }
    if types.is_empty() {
        String::new()
    } else {
        format!(":{}", types.join("|"))
    }
}

/// Turn an arbitrary base into a valid parameter name: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn sanitize_param_name(base: &str) -> String {
    let mut name: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "p_");
    }
    name
}
