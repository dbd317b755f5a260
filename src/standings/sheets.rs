use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::source::{SourceError, StandingsSource};
use super::types::{Handles, StandingRecord};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Reads standings from a Google Sheets range through the values API.
///
/// Layout: one header row, then columns A-D carry the instagram, tiktok,
/// facebook and youtube handles and `score_column` (zero-based, H by default)
/// carries the cumulative experience total.
pub struct SheetsSource {
    client: reqwest::Client,
    spreadsheet_id: String,
    range: String,
    api_key: String,
    score_column: usize,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsSource {
    pub fn new(
        client: reqwest::Client,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        api_key: impl Into<String>,
        score_column: usize,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            api_key: api_key.into(),
            score_column,
        }
    }

    fn values_url(&self) -> Result<Url, SourceError> {
        let mut url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| SourceError::InvalidLocation(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidLocation(SHEETS_API_BASE.to_string()))?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&self.range);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl StandingsSource for SheetsSource {
    fn name(&self) -> &'static str {
        "google-sheets"
    }

    async fn fetch_standings(&self) -> Result<Vec<StandingRecord>, SourceError> {
        let url = self.values_url()?;
        tracing::debug!(spreadsheet = %self.spreadsheet_id, range = %self.range, "Fetching standings");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: ValueRange = response.json().await?;
        let records = parse_rows(&body.values, self.score_column);
        tracing::debug!(rows = body.values.len(), records = records.len(), "Parsed standings");
        Ok(records)
    }
}

/// Turn sheet rows into standing records.
///
/// The first row is a header. Rows whose score cell is missing or not a
/// number are dropped; zero and negative scores are kept so a baseline
/// capture still sees them.
pub fn parse_rows(rows: &[Vec<Value>], score_column: usize) -> Vec<StandingRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|row| {
            let score = row.get(score_column).and_then(cell_number)?;
            let handles = Handles {
                instagram: row.first().and_then(cell_text),
                tiktok: row.get(1).and_then(cell_text),
                facebook: row.get(2).and_then(cell_text),
                youtube: row.get(3).and_then(cell_text),
            };
            Some(StandingRecord::new(handles, score))
        })
        .collect()
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_number(cell: &Value) -> Option<f64> {
    let number = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
