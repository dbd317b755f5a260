use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{BoardError, Result};
use crate::store::{Document, DocumentKey, DocumentStore};
use crate::validation::validate_prizes;

/// What a leaderboard position pays out. Positions are any JSON number and
/// are kept exactly as entered; they need not be whole, positive, unique or
/// contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeRecord {
    pub position: Number,
    pub description: String,
    pub value: String,
}

impl PrizeRecord {
    /// Position as a float, for ordering and rank lookup
    pub fn position_value(&self) -> f64 {
        self.position.as_f64().unwrap_or(f64::NAN)
    }
}

impl Document for Vec<PrizeRecord> {
    const KEY: DocumentKey = DocumentKey::Prizes;

    fn default_document(_now: DateTime<Utc>) -> Self {
        vec![
            PrizeRecord {
                position: Number::from(1),
                description: "1. Platz".to_string(),
                value: "1000€".to_string(),
            },
            PrizeRecord {
                position: Number::from(2),
                description: "2. Platz".to_string(),
                value: "500€".to_string(),
            },
            PrizeRecord {
                position: Number::from(3),
                description: "3. Platz".to_string(),
                value: "250€".to_string(),
            },
        ]
    }
}

/// Load prizes, sorted by position ascending for display
pub async fn load_prizes(store: &DocumentStore) -> Vec<PrizeRecord> {
    let mut prizes: Vec<PrizeRecord> = store.get().await;
    prizes.sort_by(|a, b| a.position_value().total_cmp(&b.position_value()));
    prizes
}

/// Validate an admin payload and overwrite the stored prize list.
/// The list is stored as given; ordering happens on read.
pub async fn save_prizes(store: &DocumentStore, payload: &Value) -> Result<Vec<PrizeRecord>> {
    validate_prizes(payload).map_err(BoardError::ValidationFailed)?;

    let prizes: Vec<PrizeRecord> = serde_json::from_value(payload.clone())
        .map_err(|e| BoardError::ValidationFailed(vec![format!("prizes: {}", e)]))?;

    store.put(&prizes).await?;
    Ok(prizes)
}

/// First prize listed for a rank
pub fn prize_for_rank(prizes: &[PrizeRecord], rank: usize) -> Option<&PrizeRecord> {
    prizes.iter().find(|p| p.position_value() == rank as f64)
}
