use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use cypherforge::client::{CypherExecutor, ExecutorError, WriteOutcome};
use cypherforge::cypher_generator::Parameters;
use cypherforge::graph_model::Record;

/// A statement as the executor received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub cypher: String,
    pub parameters: Parameters,
    pub write: bool,
}

/// Records every statement and answers from queued responses.
///
/// Reads with nothing queued return no rows; writes return empty counters.
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<Recorded>>,
    reads: Mutex<VecDeque<Result<Vec<Record>, ExecutorError>>>,
    writes: Mutex<VecDeque<Result<WriteOutcome, ExecutorError>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_read(&self, response: Result<Vec<Record>, ExecutorError>) {
        self.reads.lock().unwrap().push_back(response);
    }

    pub fn queue_write(&self, response: Result<WriteOutcome, ExecutorError>) {
        self.writes.lock().unwrap().push_back(response);
    }

    pub fn statements(&self) -> Vec<Recorded> {
        self.statements.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.statements()
            .into_iter()
            .map(|s| s.cypher)
            .collect()
    }

    fn record(&self, cypher: &str, parameters: &Parameters, write: bool) {
        self.statements.lock().unwrap().push(Recorded {
            cypher: cypher.to_string(),
            parameters: parameters.clone(),
            write,
        });
    }
}

#[async_trait]
impl CypherExecutor for RecordingExecutor {
    async fn execute(
        &self,
        cypher: &str,
        parameters: &Parameters,
    ) -> Result<Vec<Record>, ExecutorError> {
        self.record(cypher, parameters, false);
        self.reads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn execute_write(
        &self,
        cypher: &str,
        parameters: &Parameters,
    ) -> Result<WriteOutcome, ExecutorError> {
        self.record(cypher, parameters, true);
        self.writes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(WriteOutcome::default()))
    }
}
