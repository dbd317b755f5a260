use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;

use super::provider::DocumentProvider;
use super::{DocumentKey, StoreError};

/// Remote blob storage addressed by well-known object names.
///
/// Reads are plain GETs of `{base_url}/{file}`; writes PUT the same object with
/// the write token, overwriting whatever was there.
pub struct BlobProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl BlobProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn object_url(&self, key: DocumentKey) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key.file_name())
    }
}

#[async_trait]
impl DocumentProvider for BlobProvider {
    fn name(&self) -> &'static str {
        "blob"
    }

    async fn try_get(&self, key: DocumentKey) -> Result<Option<Value>, StoreError> {
        let response = self.client.get(self.object_url(key)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let value = response.error_for_status()?.json::<Value>().await?;
        Ok(Some(value))
    }

    async fn try_put(&self, key: DocumentKey, document: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(document)?;
        let response = self
            .client
            .put(self.object_url(key))
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .header("x-add-random-suffix", "0")
            .header("x-allow-overwrite", "1")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                provider: "blob",
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
