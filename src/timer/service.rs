use chrono::{DateTime, Utc};
use serde_json::Value;

use super::types::{TimerDocument, TimerSettings};
use crate::error::{BoardError, Result};
use crate::scoring::capture;
use crate::standings::StandingsSource;
use crate::store::{Document, DocumentStore};
use crate::validation::validate_timer;

pub async fn load_timer(store: &DocumentStore) -> TimerDocument {
    store.get().await
}

/// The stored timer for a write. Unlike `load_timer`, a failing provider is an
/// error here: starting from the default would drop the baseline.
async fn current_timer(store: &DocumentStore, now: DateTime<Utc>) -> Result<TimerDocument> {
    let current = store.try_get::<TimerDocument>().await?;
    Ok(current.unwrap_or_else(|| TimerDocument::default_document(now)))
}

/// Validate an admin payload and overwrite the stored timer.
///
/// No state guard: any combination of fields is accepted, including an end
/// date in the past on an active timer. The baseline captured at the last
/// restart is carried over unchanged.
pub async fn save_timer(store: &DocumentStore, payload: &Value) -> Result<TimerDocument> {
    validate_timer(payload).map_err(BoardError::ValidationFailed)?;

    let settings: TimerSettings = serde_json::from_value(payload.clone())
        .map_err(|e| BoardError::ValidationFailed(vec![format!("timer: {}", e)]))?;

    let current = current_timer(store, Utc::now()).await?;
    let updated = current.with_settings(settings);
    store.put(&updated).await?;

    tracing::info!(end_date = %updated.end_date, is_active = updated.is_active, "Timer saved");
    Ok(updated)
}

/// Start a new seven-day contest window at `now`.
///
/// Live standings are fetched and captured as the new baseline, then timer and
/// baseline are written together in a single put. If the fetch or the read of
/// the current timer fails nothing is written. If the write fails the error is returned and the stored timer
/// is whatever the provider left behind.
pub async fn restart_contest(
    store: &DocumentStore,
    source: &dyn StandingsSource,
    now: DateTime<Utc>,
) -> Result<TimerDocument> {
    let standings = source.fetch_standings().await?;
    let snapshot = capture(&standings);

    let current = current_timer(store, now).await?;
    let restarted = current.restarted(snapshot, now);
    store.put(&restarted).await?;

    tracing::info!(
        source = source.name(),
        participants = standings.len(),
        end_date = %restarted.end_date,
        "Contest restarted"
    );
    Ok(restarted)
}
