//! Unit tests - compiler behavior through the public API, no database needed

mod compiler_scenarios;
mod query_documents;
