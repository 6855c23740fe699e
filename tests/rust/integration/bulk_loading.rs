use cypherforge::client::{BulkSummary, GraphClient, Neo4jClient, WriteCounters, WriteOutcome};
use cypherforge::config::ClientConfig;
use cypherforge::graph_model::{Edge, Node};
use serde_json::json;

use super::recording_executor::RecordingExecutor;

fn created(nodes: u64, edges: u64) -> Result<WriteOutcome, cypherforge::client::ExecutorError> {
    Ok(WriteOutcome {
        records: vec![],
        counters: WriteCounters {
            nodes_created: nodes,
            relationships_created: edges,
            ..Default::default()
        },
    })
}

#[tokio::test]
async fn test_bulk_writer_batches_by_group_and_size() {
    let config = ClientConfig {
        bulk_batch_size: 3,
        ..Default::default()
    };
    let client = Neo4jClient::new(RecordingExecutor::new(), &config);
    // Auto flush after the third entity: two Person rows, one City row
    client.executor().queue_write(created(2, 0));
    client.executor().queue_write(created(1, 0));
    // close(): one Person row, then one KNOWS edge
    client.executor().queue_write(created(1, 0));
    client.executor().queue_write(created(0, 1));

    let mut writer = client.new_bulk_writer();
    writer
        .add_node(&Node::new(["Person"]).with_property("name", "Ada"))
        .await
        .unwrap();
    writer
        .add_node(&Node::new(["City"]).with_property("name", "London"))
        .await
        .unwrap();
    writer
        .add_node(&Node::new(["Person"]).with_property("name", "Charles"))
        .await
        .unwrap();
    assert_eq!(writer.pending(), 0);

    writer
        .add_node(&Node::new(["Person"]).with_property("name", "Mary"))
        .await
        .unwrap();
    writer
        .add_edge(&Edge::new("KNOWS", "4:db:1", "4:db:2").with_property("since", 1833))
        .await
        .unwrap();
    let summary = writer.close().await.unwrap();

    assert_eq!(
        summary,
        BulkSummary {
            nodes_created: 4,
            edges_created: 1
        }
    );
    let statements = client.executor().statements();
    assert_eq!(statements.len(), 4);
    assert_eq!(
        statements[0].cypher,
        "UNWIND $rows AS row CREATE (n:`Person`) SET n = row"
    );
    assert_eq!(
        statements[0].parameters["rows"],
        json!([{"name": "Ada"}, {"name": "Charles"}])
    );
    assert_eq!(
        statements[1].cypher,
        "UNWIND $rows AS row CREATE (n:`City`) SET n = row"
    );
    assert_eq!(
        statements[3].cypher,
        "UNWIND $rows AS row MATCH (a), (b) \
         WHERE elementId(a) = row.source_id AND elementId(b) = row.target_id \
         CREATE (a)-[r:`KNOWS`]->(b) SET r = row.properties"
    );
    assert_eq!(
        statements[3].parameters["rows"],
        json!([{"source_id": "4:db:1", "target_id": "4:db:2", "properties": {"since": 1833}}])
    );
}
