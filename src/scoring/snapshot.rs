use serde::{Deserialize, Serialize};

use crate::standings::{Handles, StandingRecord};

/// A participant's cumulative score at contest start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(flatten)]
    pub handles: Handles,
    #[serde(rename = "expTotal")]
    pub score_at_capture: f64,
}

/// Copy every record's handles and cumulative score verbatim.
///
/// No filtering: rows with zero or odd scores are captured too, so later
/// subtraction sees the same baseline the sheet had at restart time.
pub fn capture(raw: &[StandingRecord]) -> Vec<SnapshotEntry> {
    raw.iter()
        .map(|record| SnapshotEntry {
            handles: record.handles.clone(),
            score_at_capture: record.cumulative_score,
        })
        .collect()
}

/// First snapshot entry sharing any non-empty handle with `handles`.
///
/// Linear scan on purpose: a single matching channel is enough, so there is
/// no stable key to index by.
pub fn find_baseline<'a>(snapshot: &'a [SnapshotEntry], handles: &Handles) -> Option<&'a SnapshotEntry> {
    snapshot
        .iter()
        .find(|entry| entry.handles.shares_handle_with(handles))
}
