mod schema;

pub use schema::{Config, ServerConfig, SheetConfig, StorageConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const ENV_BLOB_TOKEN: &str = "BLOB_READ_WRITE_TOKEN";
pub const ENV_SHEETS_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
pub const ENV_SHEET_ID: &str = "GOOGLE_SHEET_ID";
pub const ENV_DATA_DIR: &str = "DATA_DIR";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Get the config directory path (~/.config/contest-board/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("contest-board"))
}

/// Get the default config file path (~/.config/contest-board/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Read a non-empty, trimmed environment variable
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load configuration from a YAML file
///
/// An explicitly given path must exist. The default path is optional: when it
/// is missing the built-in defaults are used.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config path does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    /// Environment wins over the file for deployment-specific settings
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(host) = env_var(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = env_var(ENV_PORT) {
            self.server.port = port
                .parse()
                .with_context(|| format!("{} must be a number, got '{}'", ENV_PORT, port))?;
        }
        if let Some(dir) = env_var(ENV_DATA_DIR) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(id) = env_var(ENV_SHEET_ID) {
            self.sheet.spreadsheet_id = Some(id);
        }
        Ok(())
    }
}

/// Credentials, read from the environment only
#[derive(Clone)]
pub struct Secrets {
    pub blob_token: Option<String>,
    pub sheets_api_key: Option<String>,
    pub admin_password: String,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            blob_token: env_var(ENV_BLOB_TOKEN),
            sheets_api_key: env_var(ENV_SHEETS_API_KEY),
            admin_password: env_var(ENV_ADMIN_PASSWORD)
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("blob_token", &self.blob_token.as_ref().map(|_| "SET"))
            .field("sheets_api_key", &self.sheets_api_key.as_ref().map(|_| "SET"))
            .field("admin_password", &"SET")
            .finish()
    }
}
