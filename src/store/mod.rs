pub mod blob;
pub mod file;
pub mod memory;
pub mod provider;

pub use blob::BlobProvider;
pub use file::FileProvider;
pub use memory::MemoryProvider;
pub use provider::DocumentProvider;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Logical names of the documents the board persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Prizes,
    Timer,
}

impl DocumentKey {
    /// Object name used by every provider (blob key, file name)
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKey::Prizes => "prizes.json",
            DocumentKey::Timer => "timer.json",
        }
    }
}

/// A typed document with a fixed key and a built-in fallback
pub trait Document: Serialize + DeserializeOwned {
    const KEY: DocumentKey;

    fn default_document(now: DateTime<Utc>) -> Self;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No storage available: configure a blob token or enable local files")]
    NoStorageAvailable,

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Blob request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} rejected the write with status {status}")]
    Rejected { provider: &'static str, status: u16 },
}

/// Ordered provider chain for small JSON documents.
///
/// Reads try each provider in turn and end in the document's default, so they
/// never fail. Writes go to the first provider only and surface its error.
/// Nothing is cached; every call goes back to the providers.
pub struct DocumentStore {
    providers: Vec<Box<dyn DocumentProvider>>,
}

impl DocumentStore {
    pub fn new(providers: Vec<Box<dyn DocumentProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Load a document, falling through the chain on errors, absence or a
    /// document that does not have the expected shape
    pub async fn get<D: Document>(&self) -> D {
        let key = D::KEY;
        for provider in &self.providers {
            match provider.try_get(key).await {
                Ok(Some(value)) => match serde_json::from_value::<D>(value) {
                    Ok(document) => {
                        tracing::debug!(provider = provider.name(), key = key.file_name(), "Loaded document");
                        return document;
                    }
                    Err(e) => {
                        tracing::warn!(provider = provider.name(), key = key.file_name(), error = %e, "Stored document unreadable, trying next provider");
                    }
                },
                Ok(None) => {
                    tracing::debug!(provider = provider.name(), key = key.file_name(), "Document not found");
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), key = key.file_name(), error = %e, "Provider failed, trying next provider");
                }
            }
        }

        tracing::info!(key = key.file_name(), "Using default document");
        D::default_document(Utc::now())
    }

    /// Strict read for read-modify-write paths.
    ///
    /// A provider error is returned instead of skipped, so a transient outage
    /// cannot make a write start from the default document. `Ok(None)` means
    /// no provider holds a usable document. A stored document with the wrong
    /// shape counts as absent, as in `get`.
    pub async fn try_get<D: Document>(&self) -> Result<Option<D>, StoreError> {
        let key = D::KEY;
        for provider in &self.providers {
            let Some(value) = provider.try_get(key).await? else {
                continue;
            };
            match serde_json::from_value::<D>(value) {
                Ok(document) => return Ok(Some(document)),
                Err(e) => {
                    tracing::warn!(provider = provider.name(), key = key.file_name(), error = %e, "Stored document unreadable, trying next provider");
                }
            }
        }
        Ok(None)
    }

    pub async fn put<D: Document>(&self, document: &D) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        self.put_value(D::KEY, &value).await
    }

    /// Overwrite the stored document on the highest-priority provider
    pub async fn put_value(&self, key: DocumentKey, value: &Value) -> Result<(), StoreError> {
        let provider = self
            .providers
            .first()
            .ok_or(StoreError::NoStorageAvailable)?;
        provider.try_put(key, value).await?;
        tracing::info!(provider = provider.name(), key = key.file_name(), "Saved document");
        Ok(())
    }
}
