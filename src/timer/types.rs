use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::SnapshotEntry;
use crate::store::{Document, DocumentKey};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const RESTART_WINDOW_DAYS: i64 = 7;

/// Parse an end date. RFC 3339 is preferred; a datetime or date without an
/// offset is taken as UTC.
pub fn parse_end_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_end_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_end_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

/// Countdown settings plus the baseline captured at the last contest start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDocument {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_end_date")]
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_exp: Option<Vec<SnapshotEntry>>,
}

/// The admin-editable part of the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_end_date")]
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Inactive,
    Running,
    Expired,
}

impl Document for TimerDocument {
    const KEY: DocumentKey = DocumentKey::Timer;

    fn default_document(now: DateTime<Utc>) -> Self {
        Self {
            title: "Contest endet in:".to_string(),
            description: "Preisauszahlung erfolgt nach Ablauf des Timers".to_string(),
            end_date: now + Duration::days(DEFAULT_WINDOW_DAYS),
            is_active: true,
            contest_start_date: None,
            start_exp: None,
        }
    }
}

impl TimerDocument {
    /// Expiry is derived from the clock on every call, never stored
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.end_date <= now
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> TimerStatus {
        if !self.is_active {
            TimerStatus::Inactive
        } else if self.is_expired_at(now) {
            TimerStatus::Expired
        } else {
            TimerStatus::Running
        }
    }

    /// Time left while running, `None` otherwise
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.status_at(now) {
            TimerStatus::Running => Some(self.end_date - now),
            _ => None,
        }
    }

    /// Time since the last contest start, if one was recorded
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.contest_start_date
            .map(|start| (now - start).max(Duration::zero()))
    }

    /// Snapshot to subtract from current standings, if one was captured
    pub fn snapshot(&self) -> Option<&[SnapshotEntry]> {
        self.start_exp.as_deref()
    }

    /// Apply admin settings. Contest start and baseline only change on restart.
    pub fn with_settings(&self, settings: TimerSettings) -> TimerDocument {
        TimerDocument {
            title: settings.title,
            description: settings.description,
            end_date: settings.end_date,
            is_active: settings.is_active,
            contest_start_date: self.contest_start_date,
            start_exp: self.start_exp.clone(),
        }
    }

    /// A fresh contest window starting `now` with the given baseline
    pub fn restarted(&self, snapshot: Vec<SnapshotEntry>, now: DateTime<Utc>) -> TimerDocument {
        TimerDocument {
            title: self.title.clone(),
            description: self.description.clone(),
            end_date: now + Duration::days(RESTART_WINDOW_DAYS),
            is_active: true,
            contest_start_date: Some(now),
            start_exp: Some(snapshot),
        }
    }
}
