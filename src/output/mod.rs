pub mod formatter;

pub use formatter::{
    format_leaderboard_table, format_remaining, format_score, format_timer, should_use_colors,
};
