use async_trait::async_trait;
use atomic_write_file::AtomicWriteFile;
use serde_json::Value;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::provider::DocumentProvider;
use super::{DocumentKey, StoreError};

/// JSON files under a data directory, one file per document
#[derive(Debug, Clone)]
pub struct FileProvider {
    data_dir: PathBuf,
}

impl FileProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, key: DocumentKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a JSON document. A missing file is `Ok(None)`.
fn read_document(path: &Path) -> Result<Option<Value>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };

    let value: Value = serde_json::from_reader(file)?;
    Ok(Some(value))
}

/// Write a JSON document atomically, creating the data directory if needed
fn write_document(path: &Path, document: &Value) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }
    }

    let mut file = AtomicWriteFile::open(path).map_err(|e| io_error(path, e))?;
    serde_json::to_writer_pretty(&mut file, document)?;
    file.commit().map_err(|e| io_error(path, e))?;

    Ok(())
}

fn join_error(path: &Path, e: tokio::task::JoinError) -> StoreError {
    io_error(path, std::io::Error::other(format!("Task join error: {}", e)))
}

#[async_trait]
impl DocumentProvider for FileProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn try_get(&self, key: DocumentKey) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || read_document(&task_path))
            .await
            .map_err(|e| join_error(&path, e))?
    }

    async fn try_put(&self, key: DocumentKey, document: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let task_path = path.clone();
        let document = document.clone();
        tokio::task::spawn_blocking(move || write_document(&task_path, &document))
            .await
            .map_err(|e| join_error(&path, e))?
    }
}
