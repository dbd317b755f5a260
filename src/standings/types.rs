use serde::{Deserialize, Serialize};

/// Identity channels, in match-priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Instagram,
    Tiktok,
    Facebook,
    Youtube,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Instagram,
        Channel::Tiktok,
        Channel::Facebook,
        Channel::Youtube,
    ];
}

/// The social handles a participant is known by.
///
/// There is no participant id. Two handle sets belong to the same participant
/// when at least one channel carries the same non-empty handle in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

impl Handles {
    /// Handle on the given channel, treating empty strings as absent
    pub fn get(&self, channel: Channel) -> Option<&str> {
        let handle = match channel {
            Channel::Instagram => self.instagram.as_deref(),
            Channel::Tiktok => self.tiktok.as_deref(),
            Channel::Facebook => self.facebook.as_deref(),
            Channel::Youtube => self.youtube.as_deref(),
        };
        handle.filter(|h| !h.is_empty())
    }

    /// True if any channel carries the same non-empty handle on both sides.
    /// Comparison is exact; no trimming or case folding.
    pub fn shares_handle_with(&self, other: &Handles) -> bool {
        Channel::ALL
            .iter()
            .any(|&channel| match (self.get(channel), other.get(channel)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            })
    }

    /// First non-empty handle in channel order, for display
    pub fn display_name(&self) -> &str {
        Channel::ALL
            .iter()
            .find_map(|&channel| self.get(channel))
            .unwrap_or("(unknown)")
    }
}

/// One row of raw standings: who, and their cumulative experience total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRecord {
    #[serde(flatten)]
    pub handles: Handles,
    #[serde(rename = "expTotal")]
    pub cumulative_score: f64,
}

impl StandingRecord {
    pub fn new(handles: Handles, cumulative_score: f64) -> Self {
        Self {
            handles,
            cumulative_score,
        }
    }
}
