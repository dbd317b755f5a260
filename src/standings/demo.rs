use async_trait::async_trait;

use super::source::{SourceError, StandingsSource};
use super::types::{Handles, StandingRecord};

/// Fixed standings used when no spreadsheet is configured
#[derive(Debug, Clone, Default)]
pub struct DemoSource;

fn handles(instagram: Option<&str>, tiktok: Option<&str>, facebook: Option<&str>) -> Handles {
    Handles {
        instagram: instagram.map(str::to_string),
        tiktok: tiktok.map(str::to_string),
        facebook: facebook.map(str::to_string),
        youtube: None,
    }
}

pub fn demo_standings() -> Vec<StandingRecord> {
    vec![
        StandingRecord::new(
            handles(Some("influencer_max"), Some("max_tiktok"), Some("Max Mustermann")),
            2500.0,
        ),
        StandingRecord::new(handles(Some("anna_insta"), None, Some("Anna Schmidt")), 2100.0),
        StandingRecord::new(handles(None, Some("tom_viral"), Some("Thomas Weber")), 1950.0),
        StandingRecord::new(handles(Some("lisa_photos"), Some("lisa_dance"), None), 1800.0),
        StandingRecord::new(
            handles(Some("mike_fitness"), Some("mike_workouts"), Some("Mike Johnson")),
            1650.0,
        ),
    ]
}

#[async_trait]
impl StandingsSource for DemoSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn fetch_standings(&self) -> Result<Vec<StandingRecord>, SourceError> {
        Ok(demo_standings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_source_returns_fixed_rows() {
        let records = DemoSource.fetch_standings().await.unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].handles.display_name(), "influencer_max");
        assert_eq!(records[2].handles.display_name(), "tom_viral");
    }
}
