use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prizes::{load_prizes, PrizeRecord};
use crate::scoring::{normalize, RankedEntry};
use crate::standings::StandingsSource;
use crate::store::DocumentStore;
use crate::timer::{load_timer, TimerDocument};

/// Everything the display needs in one read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardData {
    pub entries: Vec<RankedEntry>,
    pub prizes: Vec<PrizeRecord>,
    pub timer: TimerDocument,
    pub last_updated: DateTime<Utc>,
}

/// Fetch live standings and documents, then rank against the stored baseline.
///
/// Called per request; nothing is cached between calls. A standings failure
/// fails the whole read, document reads never do.
pub async fn build_leaderboard(
    store: &DocumentStore,
    source: &dyn StandingsSource,
    now: DateTime<Utc>,
) -> Result<LeaderboardData> {
    let standings = source.fetch_standings().await.map_err(|e| {
        tracing::error!(source = source.name(), error = %e, "Standings fetch failed");
        e
    })?;

    let (prizes, timer) = tokio::join!(load_prizes(store), load_timer(store));

    let entries = normalize(&standings, timer.snapshot());

    tracing::debug!(
        source = source.name(),
        raw = standings.len(),
        ranked = entries.len(),
        baseline = timer.snapshot().is_some(),
        "Leaderboard built"
    );

    Ok(LeaderboardData {
        entries,
        prizes,
        timer,
        last_updated: now,
    })
}
