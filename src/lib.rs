pub mod config;
pub mod context;
pub mod error;
pub mod leaderboard;
pub mod output;
pub mod prizes;
pub mod scoring;
pub mod server;
pub mod standings;
pub mod store;
pub mod timer;
pub mod validation;

pub use context::AppContext;
pub use error::{BoardError, Result};
