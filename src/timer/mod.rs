pub mod service;
pub mod types;

pub use service::{load_timer, restart_contest, save_timer};
pub use types::{parse_end_date, TimerDocument, TimerSettings, TimerStatus};
