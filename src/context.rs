use std::sync::Arc;

use crate::config::{Config, Secrets};
use crate::standings::{DemoSource, SheetsSource, StandingsSource};
use crate::store::{BlobProvider, DocumentProvider, DocumentStore, FileProvider, MemoryProvider};

type StoreFactory = dyn Fn() -> DocumentStore + Send + Sync;

/// What a request needs: a way to build a fresh document store, the
/// standings source and the admin password.
///
/// Holds no documents itself. Every call to `document_store` evaluates the
/// provider chain again.
#[derive(Clone)]
pub struct AppContext {
    admin_password: Arc<str>,
    store_factory: Arc<StoreFactory>,
    source: Arc<dyn StandingsSource>,
}

impl AppContext {
    pub fn new(
        admin_password: impl Into<Arc<str>>,
        store_factory: impl Fn() -> DocumentStore + Send + Sync + 'static,
        source: Arc<dyn StandingsSource>,
    ) -> Self {
        Self {
            admin_password: admin_password.into(),
            store_factory: Arc::new(store_factory),
            source,
        }
    }

    /// Build the context from configuration. With `ephemeral` set, documents
    /// live in process memory only.
    pub fn from_config(config: &Config, secrets: &Secrets, ephemeral: bool) -> Self {
        let client = reqwest::Client::new();
        let source = standings_source(config, secrets, &client);

        if ephemeral {
            let memory = MemoryProvider::new();
            return Self::new(
                secrets.admin_password.as_str(),
                move || DocumentStore::new(vec![Box::new(memory.clone())]),
                source,
            );
        }

        let config = config.clone();
        let blob_token = secrets.blob_token.clone();
        if blob_token.is_some() && config.storage.blob_base_url.is_none() {
            tracing::warn!("Blob token set but storage.blob_base_url missing, blob storage disabled");
        }

        Self::new(
            secrets.admin_password.as_str(),
            move || build_store(&config, blob_token.as_deref(), &client),
            source,
        )
    }

    pub fn document_store(&self) -> DocumentStore {
        (self.store_factory)()
    }

    pub fn source(&self) -> &dyn StandingsSource {
        self.source.as_ref()
    }

    pub fn is_admin_password(&self, candidate: &str) -> bool {
        !candidate.is_empty() && candidate == &*self.admin_password
    }
}

/// Provider chain in priority order: blob (when configured), then local files
pub fn build_store(config: &Config, blob_token: Option<&str>, client: &reqwest::Client) -> DocumentStore {
    let mut providers: Vec<Box<dyn DocumentProvider>> = Vec::new();

    if let (Some(token), Some(base_url)) = (blob_token, config.storage.blob_base_url.as_deref()) {
        providers.push(Box::new(BlobProvider::new(client.clone(), base_url, token)));
    }

    if config.storage.local_files {
        providers.push(Box::new(FileProvider::new(config.storage.data_dir())));
    }

    DocumentStore::new(providers)
}

fn standings_source(config: &Config, secrets: &Secrets, client: &reqwest::Client) -> Arc<dyn StandingsSource> {
    match (&config.sheet.spreadsheet_id, &secrets.sheets_api_key) {
        (Some(id), Some(key)) => Arc::new(SheetsSource::new(
            client.clone(),
            id.clone(),
            config.sheet.range.clone(),
            key.clone(),
            config.sheet.score_column,
        )),
        _ => {
            tracing::info!("No spreadsheet configured, serving demo standings");
            Arc::new(DemoSource)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    fn secrets(blob_token: Option<&str>) -> Secrets {
        Secrets {
            blob_token: blob_token.map(str::to_string),
            sheets_api_key: None,
            admin_password: "pw".to_string(),
        }
    }

    fn config(local_files: bool, blob_base_url: Option<&str>) -> Config {
        Config {
            storage: StorageConfig {
                data_dir: None,
                local_files,
                blob_base_url: blob_base_url.map(str::to_string),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_chain_blob_then_file() {
        let store = build_store(
            &config(true, Some("https://blob.example.com")),
            Some("token"),
            &reqwest::Client::new(),
        );
        assert_eq!(store.provider_names(), vec!["blob", "file"]);
    }

    #[test]
    fn test_blob_needs_token() {
        let store = build_store(
            &config(true, Some("https://blob.example.com")),
            None,
            &reqwest::Client::new(),
        );
        assert_eq!(store.provider_names(), vec!["file"]);
    }

    #[test]
    fn test_no_providers_when_files_disabled() {
        let store = build_store(&config(false, None), Some("token"), &reqwest::Client::new());
        assert!(store.provider_names().is_empty());
    }

    #[test]
    fn test_demo_source_without_sheet() {
        let context = AppContext::from_config(&Config::default(), &secrets(None), true);
        assert_eq!(context.source().name(), "demo");
        assert_eq!(context.document_store().provider_names(), vec!["memory"]);
    }

    #[test]
    fn test_admin_password_check() {
        let context = AppContext::from_config(&Config::default(), &secrets(None), true);
        assert!(context.is_admin_password("pw"));
        assert!(!context.is_admin_password("PW"));
        assert!(!context.is_admin_password(""));
    }
}
