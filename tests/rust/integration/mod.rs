//! Integration tests - the client driving a recording executor end to end
//!
//! These tests verify that the compiler, statements and client work together.

mod bulk_loading;
mod recording_executor;
