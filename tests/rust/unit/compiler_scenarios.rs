use cypherforge::cypher_generator::{
    compile, compile_count, compile_delete, compile_return, compile_set, pattern::render_match,
    AliasKind, EdgeBinding, IntroducedAlias, OperationClause, ParamBinder, Projection, Target,
};
use cypherforge::graph_model::{
    Condition, EdgeDirection, EdgePattern, Operator, Order, Pattern, Properties, Query,
    ReturnItem, Where,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;

lazy_static! {
    static ref PARAM_NAME: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

fn keys(query: &cypherforge::cypher_generator::CompiledQuery) -> Vec<&str> {
    query.parameters.keys().map(String::as_str).collect()
}

#[test]
fn test_single_labeled_node() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])]).returning(ReturnItem::new("n"));

    let compiled = compile_return(&query);

    assert_eq!(compiled.text, "MATCH (n:`Person`) RETURN n");
    assert!(compiled.parameters.is_empty());
}

#[test]
fn test_inline_properties_keep_declaration_order() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])
        .with_property("name", "Alice")
        .with_property("age", 30)])
    .returning(ReturnItem::new("n"));

    let compiled = compile_return(&query);

    assert_eq!(
        compiled.text,
        "MATCH (n:`Person` {name: $n_name, age: $n_age}) RETURN n"
    );
    assert_eq!(keys(&compiled), vec!["n_name", "n_age"]);
    assert_eq!(compiled.parameters["n_name"], json!("Alice"));
    assert_eq!(compiled.parameters["n_age"], json!(30));
}

#[test]
fn test_ordering_and_paging() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])])
        .order(Order::desc("n", "age"))
        .order(Order::asc("n", "name"))
        .with_skip(10)
        .with_limit(5);

    let compiled = compile_return(&query);

    assert!(compiled
        .text
        .ends_with("RETURN n ORDER BY n.age DESC, n.name ASC SKIP $skip LIMIT $limit"));
    assert_eq!(compiled.parameters["skip"], json!(10));
    assert_eq!(compiled.parameters["limit"], json!(5));
    assert_eq!(keys(&compiled), vec!["skip", "limit"]);
}

#[test]
fn test_variable_length_edge_segment() {
    let query = Query::new(vec![Pattern::node("a", ["Person"]).with_edge(
        EdgePattern::new(["KNOWS"], EdgeDirection::Outgoing).with_hops(Some(2), Some(5)),
    )]);

    let compiled = compile_return(&query);

    assert!(compiled.text.contains("-[:KNOWS*2..5]->"));
    assert_eq!(compiled.text, "MATCH (a:`Person`)-[:KNOWS*2..5]->(m) RETURN a, m");
}

#[test]
fn test_node_delete_is_always_detached() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])]);

    let compiled = compile_delete(&query, Target::FirstNode);

    assert!(compiled.text.ends_with("DETACH DELETE n"));
    assert_eq!(compiled.text, "MATCH (n:`Person`) DETACH DELETE n");
}

#[test]
fn test_set_without_properties_is_a_no_op() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])]);

    let compiled = compile_set(&query, Target::FirstNode, &Properties::new());

    assert!(!compiled.text.contains("SET"));
    assert!(!compiled.has_operation());
    assert!(compiled.parameters.is_empty());
}

#[test]
fn test_full_where_group_order() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])]).with_where(Where {
        filter: vec![Condition::new("n", "active", Operator::Equal, true)],
        must: vec![Condition::new("n", "age", Operator::GreaterThanOrEqual, 18)],
        should: vec![
            Condition::new("n", "city", Operator::Equal, "Oslo"),
            Condition::new("n", "city", Operator::Equal, "Bergen"),
        ],
        must_not: vec![Condition::new("n", "tags", Operator::Contains, "banned")],
    });

    let compiled = compile_count(&query);

    assert_eq!(
        compiled.text,
        "MATCH (n:`Person`) WHERE n.active = $n_active AND (n.age >= $n_age) \
         AND (n.city = $n_city OR n.city = $n_city_1) AND NOT (n.tags CONTAINS $n_tags) \
         RETURN count(n)"
    );
    assert_eq!(
        keys(&compiled),
        vec!["n_active", "n_age", "n_city", "n_city_1", "n_tags"]
    );
}

#[test]
fn test_compiling_twice_is_identical() {
    let query = Query::new(vec![
        Pattern::node("a", ["Person"])
            .with_property("z", 1)
            .with_property("a", 2)
            .with_property("m", 3)
            .with_edge(
                EdgePattern::new(["KNOWS", "LIKES"], EdgeDirection::Both)
                    .with_alias("r")
                    .with_property("since", 2020)
                    .to_node(Pattern::node("b", ["Person"])),
            ),
        Pattern::node("c", ["City"]).with_property("name", "Oslo"),
    ])
    .with_where(Where {
        should: vec![
            Condition::new("a", "z", Operator::In, json!([1, 2, 3])),
            Condition::new("b", "age", Operator::LessThan, 40),
        ],
        ..Default::default()
    })
    .with_limit(3);

    let first = compile_return(&query);
    let second = compile_return(&query);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_parameter_names_are_plain_identifiers() {
    let query = Query::new(vec![Pattern::node("", ["Person"])
        .with_property("first name", "Ada")
        .with_property("e-mail", "ada@example.com")
        .with_property("1st", true)])
    .with_where(Where {
        filter: vec![
            Condition::new("9lives", "x", Operator::Equal, 1),
            Condition::new("n", "first name", Operator::NotEqual, "Bob"),
        ],
        ..Default::default()
    })
    .with_skip(1)
    .with_limit(2);

    let compiled = compile_return(&query);

    assert_eq!(compiled.parameters.len(), 7);
    for name in compiled.parameters.keys() {
        assert!(PARAM_NAME.is_match(name), "{} is not a plain identifier", name);
        assert!(
            compiled.text.contains(&format!("${}", name)),
            "{} is not referenced in {}",
            name,
            compiled.text
        );
    }
    assert!(compiled.text.contains("`first name`: $n_first_name"));
    assert!(compiled.text.contains("n.first name <> $n_first_name_1"));
}

#[test]
fn test_inline_properties_bind_alias_key_names() {
    let mut binder = ParamBinder::new();
    let patterns = vec![Pattern::node("p", ["Person"])
        .with_property("name", "Ada")
        .with_edge(
            EdgePattern::new(["WROTE"], EdgeDirection::Outgoing)
                .with_alias("w")
                .with_property("year", 1843)
                .to_node(Pattern::node("d", ["Paper"])),
        )];

    let clause = render_match(&patterns, EdgeBinding::Named, &mut binder);

    assert_eq!(
        clause.text,
        "MATCH (p:`Person` {name: $p_name})-[w:WROTE {year: $w_year}]->(d:`Paper`)"
    );
    let names: Vec<&String> = binder.params().keys().collect();
    assert_eq!(names, vec!["p_name", "w_year"]);
}

#[test]
fn test_alias_list_follows_declaration_order() {
    let mut binder = ParamBinder::new();
    let patterns = vec![
        Pattern::node("a", ["Person"]).with_edge(
            EdgePattern::new(["KNOWS"], EdgeDirection::Outgoing)
                .with_alias("k")
                .to_node(Pattern::node("b", ["Person"])),
        ),
        Pattern::node("c", ["City"]).with_edge(
            EdgePattern::new(["IN"], EdgeDirection::Incoming)
                .to_node(Pattern::node("", ["Country"])),
        ),
    ];

    let clause = render_match(&patterns, EdgeBinding::Named, &mut binder);

    assert_eq!(
        clause.aliases,
        vec![
            IntroducedAlias::node("a"),
            IntroducedAlias::edge("k"),
            IntroducedAlias::node("b"),
            IntroducedAlias::node("c"),
            IntroducedAlias::node("m"),
        ]
    );
    assert_eq!(
        clause.text,
        "MATCH (a:`Person`)-[k:KNOWS]->(b:`Person`), (c:`City`)<-[:IN]-(m:`Country`)"
    );

    let bound = render_match(&patterns, EdgeBinding::Always, &mut ParamBinder::new());
    let edges: Vec<&str> = bound
        .aliases
        .iter()
        .filter(|a| a.kind == AliasKind::Edge)
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(edges, vec!["k", "r"]);
}

#[test]
fn test_far_node_properties_and_nested_edges_are_not_rendered() {
    let far = Pattern::node("b", ["Person"])
        .with_property("name", "Bob")
        .with_edge(EdgePattern::new(["OWNS"], EdgeDirection::Outgoing));
    let query = Query::new(vec![Pattern::node("a", ["Person"])
        .with_edge(EdgePattern::new(["KNOWS"], EdgeDirection::Outgoing).to_node(far))]);

    let compiled = compile_return(&query);

    assert_eq!(
        compiled.text,
        "MATCH (a:`Person`)-[:KNOWS]->(b:`Person`) RETURN a, b"
    );
    assert!(compiled.parameters.is_empty());
}

#[test]
fn test_explicit_alias_target_and_count() {
    let query = Query::new(vec![Pattern::node("a", ["Person"]).with_edge(
        EdgePattern::new(["KNOWS"], EdgeDirection::Outgoing)
            .to_node(Pattern::node("b", ["Person"])),
    )]);
    let mut props = Properties::new();
    props.insert("seen".into(), json!(true));

    let set = compile(
        &query,
        &OperationClause::Set {
            target: Target::Alias("b"),
            properties: &props,
        },
    );
    let count = compile(&query, &OperationClause::Count { alias: Some("b") });
    let projection = compile(&query, &OperationClause::Return(Projection::default()));

    assert!(set.text.ends_with("SET b.seen = $set_b_seen"));
    assert!(count.text.ends_with("RETURN count(b)"));
    assert!(projection.text.ends_with("RETURN a, b"));
}

#[test]
fn test_unknown_target_alias_degrades_to_match_only() {
    let query = Query::new(vec![Pattern::node("n", ["Person"])]);

    let compiled = compile_delete(&query, Target::Alias("ghost"));

    assert_eq!(compiled.text, "MATCH (n:`Person`)");
    assert!(!compiled.has_operation());
}
