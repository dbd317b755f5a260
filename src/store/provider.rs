use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentKey, StoreError};

/// One backing store in the document chain.
///
/// `try_get` returns `Ok(None)` when the document simply is not there; any
/// `Err` is treated by the chain as "try the next provider".
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_get(&self, key: DocumentKey) -> Result<Option<Value>, StoreError>;

    async fn try_put(&self, key: DocumentKey, document: &Value) -> Result<(), StoreError>;
}
