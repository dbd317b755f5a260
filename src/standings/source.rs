use async_trait::async_trait;
use thiserror::Error;

use super::types::StandingRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet responded with status {0}")]
    Status(u16),

    #[error("Invalid spreadsheet location: {0}")]
    InvalidLocation(String),
}

/// Where raw standings come from. Every call is a fresh fetch.
#[async_trait]
pub trait StandingsSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_standings(&self) -> Result<Vec<StandingRecord>, SourceError>;
}
