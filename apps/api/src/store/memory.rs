#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};

/// In-memory backend with the same contract as `FileStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Value>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, record: Value) -> Result<(), StoreError> {
        if !record.is_object() {
            return Err(StoreError::NotAnArray);
        }
        self.records.write().await.push(record);
        Ok(())
    }
}
