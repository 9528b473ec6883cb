#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryResultSink, ResultRecord, ResultSink, StorageError};
