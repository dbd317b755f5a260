pub mod demo;
pub mod sheets;
pub mod source;
pub mod types;

pub use demo::DemoSource;
pub use sheets::SheetsSource;
pub use source::{SourceError, StandingsSource};
pub use types::{Channel, Handles, StandingRecord};
