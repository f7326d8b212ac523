//! Record stores: one JSON array of objects per resource.
//!
//! `RecordStore` is the storage seam: `FileStore` for running services,
//! `MemoryStore` for tests. `Repository<T>` is the typed facade handlers use.
//!
//! Neither backend coordinates writers. Two appends racing on the same store
//! may lose one record (last writer wins); that is the current contract.

pub mod file;
pub mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store holds invalid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("store top level must be an array of objects")]
    NotAnArray,

    #[error("record could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored record, in insertion order, exactly as persisted.
    async fn list_all(&self) -> Result<Vec<Value>, StoreError>;

    /// Appends one record, rewriting the whole store.
    async fn append(&self, record: Value) -> Result<(), StoreError>;
}

/// Parses a raw store document, requiring a top-level array of objects.
pub(crate) fn parse_records(raw: &str) -> Result<Vec<Value>, StoreError> {
    match serde_json::from_str::<Value>(raw).map_err(StoreError::Malformed)? {
        Value::Array(records) if records.iter().all(Value::is_object) => Ok(records),
        _ => Err(StoreError::NotAnArray),
    }
}

/// Typed view of a store. Serializing `T` turns identifiers, dates and
/// timestamps (including those of embedded records) into JSON strings.
pub struct Repository<T> {
    backend: Arc<dyn RecordStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _record: PhantomData,
        }
    }
}

impl<T: Serialize> Repository<T> {
    pub fn new(backend: Arc<dyn RecordStore>) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Value>, StoreError> {
        self.backend.list_all().await
    }

    pub async fn append(&self, record: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(record).map_err(StoreError::Encode)?;
        self.backend.append(value).await
    }
}
