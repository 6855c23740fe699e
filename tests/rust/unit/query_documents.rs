use cypherforge::cypher_generator::{compile_delete, compile_return, Target};
use cypherforge::graph_model::{EdgeDirection, Operator, Query};
use serde_json::json;

#[test]
fn test_json_document_compiles() {
    let query: Query = serde_json::from_value(json!({
        "match": [{
            "alias": "p",
            "labels": ["Person"],
            "properties": {"country": "NO"},
            "edge": {
                "labels": ["WORKS_AT"],
                "direction": "->",
                "node": {"alias": "c", "labels": ["Company"]}
            }
        }],
        "where": {
            "filter": [{"alias": "c", "property": "employees", "operator": ">", "value": 100}]
        },
        "return": [
            {"expression": "p.name", "alias": "name"},
            {"expression": "c.name"}
        ],
        "order_by": [{"alias": "p", "property": "name", "asc": true}],
        "limit": 20
    }))
    .unwrap();

    let compiled = compile_return(&query);

    assert_eq!(
        compiled.text,
        "MATCH (p:`Person` {country: $p_country})-[:WORKS_AT]->(c:`Company`) \
         WHERE c.employees > $c_employees \
         RETURN p.name AS name, c.name ORDER BY p.name ASC LIMIT $limit"
    );
    assert_eq!(
        serde_json::to_value(&compiled).unwrap()["parameters"],
        json!({"p_country": "NO", "c_employees": 100, "limit": 20})
    );
}

#[test]
fn test_yaml_document_compiles() {
    let yaml = r#"
match:
  - alias: a
    labels: [Account]
    edge:
      alias: t
      labels: [TRANSFER]
      direction: outgoing
      min_hops: 1
      max_hops: 3
where:
  must_not:
    - { alias: a, property: frozen, operator: "=", value: true }
"#;
    let query: Query = serde_yaml::from_str(yaml).unwrap();

    let compiled = compile_delete(&query, Target::FirstEdge);

    assert_eq!(
        compiled.text,
        "MATCH (a:`Account`)-[t:TRANSFER*1..3]->(m) WHERE NOT (a.frozen = $a_frozen) DELETE t"
    );
}

#[test]
fn test_unknown_tokens_fall_back_to_defaults() {
    let query: Query = serde_json::from_value(json!({
        "match": [{
            "alias": "n",
            "edge": {"labels": ["R"], "direction": "sideways"}
        }],
        "where": {
            "filter": [{"alias": "n", "property": "x", "operator": "~=", "value": 1}]
        }
    }))
    .unwrap();

    let edge = query.patterns[0].edge.as_deref().unwrap();
    assert_eq!(edge.direction, EdgeDirection::Outgoing);
    let condition = &query.where_clause.as_ref().unwrap().filter[0];
    assert_eq!(condition.operator, Operator::Equal);

    let compiled = compile_return(&query);
    assert_eq!(
        compiled.text,
        "MATCH (n)-[:R]->(m) WHERE n.x = $n_x RETURN n, m"
    );
}

#[test]
fn test_query_round_trips_through_json() {
    let original: Query = serde_json::from_value(json!({
        "match": [{"alias": "n", "labels": ["Person"], "properties": {"name": "Ada"}}],
        "where": {"should": [{"alias": "n", "property": "age", "operator": "<=", "value": 36}]},
        "skip": 5
    }))
    .unwrap();

    let reparsed: Query =
        serde_json::from_str(&serde_json::to_string(&original).unwrap()).unwrap();

    assert_eq!(reparsed, original);
    assert_eq!(compile_return(&reparsed), compile_return(&original));
}
