use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::provider::DocumentProvider;
use super::{DocumentKey, StoreError};

/// Process-local documents. Clones share the same map, so a test or an
/// ephemeral server can hand a fresh store to every request and still see
/// earlier writes.
#[derive(Clone, Default)]
pub struct MemoryProvider {
    documents: Arc<Mutex<HashMap<DocumentKey, Value>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: DocumentKey, document: Value) {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.insert(key, document);
    }

    /// Current raw document, if any
    pub fn stored(&self, key: DocumentKey) -> Option<Value> {
        let documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.get(&key).cloned()
    }
}

#[async_trait]
impl DocumentProvider for MemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn try_get(&self, key: DocumentKey) -> Result<Option<Value>, StoreError> {
        Ok(self.stored(key))
    }

    async fn try_put(&self, key: DocumentKey, document: &Value) -> Result<(), StoreError> {
        self.insert(key, document.clone());
        Ok(())
    }
}
