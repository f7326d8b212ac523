use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info};

use super::{parse_records, RecordStore, StoreError};

/// A store backed by a single JSON file holding an array of objects.
///
/// Every operation reads the whole file. `append` rewrites it in place from
/// offset 0 without truncating. The result is only well formed when the old
/// bytes were compact `serde_json` output: a file written with indentation or
/// `\uXXXX` escapes can re-encode shorter and keep a tail of stale bytes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file holding `[]` if it does not exist yet. Existing files
    /// are left untouched, even if they are malformed.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, b"[]").await?;
        info!("Initialized empty store at {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn list_all(&self) -> Result<Vec<Value>, StoreError> {
        let raw = fs::read_to_string(&self.path).await?;
        parse_records(&raw)
    }

    async fn append(&self, record: Value) -> Result<(), StoreError> {
        if !record.is_object() {
            return Err(StoreError::NotAnArray);
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .await?;

        let mut raw = String::new();
        file.read_to_string(&mut raw).await?;
        let mut records = parse_records(&raw)?;
        records.push(record);

        let encoded = serde_json::to_vec(&records).map_err(StoreError::Encode)?;
        file.seek(SeekFrom::Start(0)).await?;
        file.write_all(&encoded).await?;
        file.flush().await?;

        debug!(
            "Appended record to {} ({} records)",
            self.path.display(),
            records.len()
        );
        Ok(())
    }
}
