use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Board configuration.
///
/// Every section is optional; a missing config file means all defaults.
///
/// Example YAML:
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8080
/// storage:
///   data_dir: /var/lib/contest-board
///   local_files: true
///   blob_base_url: https://example.public.blob.vercel-storage.com
/// sheet:
///   spreadsheet_id: 1AbC...
///   range: "Globaluser!A:H"
///   score_column: 7
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub sheet: SheetConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Where documents (prizes, timer) are persisted.
///
/// The blob store is only used when `BLOB_READ_WRITE_TOKEN` is set and a base
/// URL is configured. `local_files: false` drops the data directory from the
/// chain, which leaves writes with nowhere to go unless the blob is set up.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory for local JSON documents (default: ./data)
    pub data_dir: Option<PathBuf>,
    pub local_files: bool,
    pub blob_base_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            local_files: true,
            blob_base_url: None,
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("data"))
    }
}

/// Spreadsheet holding the raw standings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Without an id (or without `GOOGLE_API_KEY`) the demo standings are served
    pub spreadsheet_id: Option<String>,
    pub range: String,
    /// Zero-based column of the cumulative score (H = 7)
    pub score_column: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: "Globaluser!A:H".to_string(),
            score_column: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert!(config.storage.local_files);
        assert_eq!(config.storage.data_dir(), PathBuf::from("data"));
        assert_eq!(config.sheet.range, "Globaluser!A:H");
        assert_eq!(config.sheet.score_column, 7);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "server:\n  port: 8080\nstorage:\n  local_files: false\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.storage.local_files);
        assert_eq!(config.sheet.score_column, 7);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "storage:\n  local_file: true\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
