use serde::{Deserialize, Serialize};

use super::snapshot::{find_baseline, SnapshotEntry};
use crate::standings::{Handles, StandingRecord};

/// A participant's position on the leaderboard for the current contest period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub handles: Handles,
    #[serde(rename = "expTotal")]
    pub net_score: f64,
    pub rank: usize,
}

/// Rows with a non-finite or non-positive cumulative score are data errors
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && score > 0.0
}

/// Experience gained since the baseline, floored at zero.
/// Without a matching baseline the cumulative total counts in full.
pub fn net_score(record: &StandingRecord, snapshot: Option<&[SnapshotEntry]>) -> f64 {
    match snapshot.and_then(|entries| find_baseline(entries, &record.handles)) {
        Some(baseline) => (record.cumulative_score - baseline.score_at_capture).max(0.0),
        None => record.cumulative_score,
    }
}

/// Rank raw standings by period gain.
///
/// Invalid rows are dropped, the rest are sorted by net score descending with
/// a stable sort, and rank is simply position + 1. Equal scores get
/// consecutive ranks, never a shared one.
pub fn normalize(raw: &[StandingRecord], snapshot: Option<&[SnapshotEntry]>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = raw
        .iter()
        .filter(|record| is_valid_score(record.cumulative_score))
        .map(|record| RankedEntry {
            handles: record.handles.clone(),
            net_score: net_score(record, snapshot),
            rank: 0,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.net_score
            .partial_cmp(&a.net_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }

    entries
}
