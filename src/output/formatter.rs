use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::prizes::{prize_for_rank, PrizeRecord};
use crate::scoring::RankedEntry;
use crate::standings::Channel;
use crate::timer::{TimerDocument, TimerStatus};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score in compact notation (1.5k, 2.3M, 847)
pub fn format_score(score: f64) -> String {
    let formatted = if score >= 1_000_000.0 {
        format!("{:.1}M", score / 1_000_000.0)
    } else if score >= 1_000.0 {
        format!("{:.1}k", score / 1_000.0)
    } else {
        format!("{:.0}", score)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// All handles of an entry as "ig:max tiktok:max_tt"
fn format_handles(entry: &RankedEntry) -> String {
    Channel::ALL
        .iter()
        .filter_map(|&channel| {
            entry
                .handles
                .get(channel)
                .map(|handle| format!("{}:{}", short_channel(channel), handle))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn short_channel(channel: Channel) -> &'static str {
    match channel {
        Channel::Instagram => "ig",
        Channel::Tiktok => "tt",
        Channel::Facebook => "fb",
        Channel::Youtube => "yt",
    }
}

/// Format ranked entries as a table: rank, score, handles, prize.
/// Rank column: 4 chars (fits "999."), score column 7 chars, right-aligned.
pub fn format_leaderboard_table(
    entries: &[RankedEntry],
    prizes: &[PrizeRecord],
    use_colors: bool,
) -> String {
    if entries.is_empty() {
        return "No participants yet.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 4;
    let score_width = 7;
    let separator = "  ";

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>3}.", entry.rank);
            let score_str = format!("{:>width$}", format_score(entry.net_score), width = score_width);
            let prize = prize_for_rank(prizes, entry.rank)
                .map(|p| p.value.clone())
                .unwrap_or_default();

            let fixed_width = rank_width + 1 + score_width + separator.len() * 2 + prize.chars().count();
            let handles = format_handles(entry);
            let handles = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&handles, width - fixed_width),
                Some(_) => truncate(&handles, 20),
                None => handles,
            };

            let line = if use_colors {
                format!(
                    "{} {}{}{}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    separator,
                    handles
                )
            } else {
                format!("{} {}{}{}", rank_str, score_str, separator, handles)
            };

            if prize.is_empty() {
                line
            } else if use_colors {
                format!("{}{}{}", line, separator, prize.yellow())
            } else {
                format!("{}{}{}", line, separator, prize)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration as the largest two units ("6d 23h", "4h 5m", "42s")
pub fn format_remaining(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days >= 1 {
        format!("{}d {}h", days, hours)
    } else if hours >= 1 {
        format!("{}h {}m", hours, minutes)
    } else if minutes >= 1 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Multi-line timer summary: title, status, end date, contest start
pub fn format_timer(timer: &TimerDocument, now: DateTime<Utc>, use_colors: bool) -> String {
    let status = match timer.status_at(now) {
        TimerStatus::Inactive => "inactive".to_string(),
        TimerStatus::Expired => "expired".to_string(),
        TimerStatus::Running => match timer.remaining_at(now) {
            Some(left) => format!("running, {} left", format_remaining(left)),
            None => "running".to_string(),
        },
    };

    let mut lines = vec![
        if use_colors {
            timer.title.bold().to_string()
        } else {
            timer.title.clone()
        },
        format!("  {}", timer.description),
        format!("  Status: {}", status),
        format!("  Ends: {}", timer.end_date.to_rfc3339()),
    ];

    if let (Some(start), Some(elapsed)) = (timer.contest_start_date, timer.elapsed_at(now)) {
        lines.push(format!(
            "  Started: {} ({} ago)",
            start.to_rfc3339(),
            format_remaining(elapsed)
        ));
    }
    if let Some(snapshot) = timer.snapshot() {
        lines.push(format!("  Baseline: {} participants", snapshot.len()));
    }

    lines.join("\n")
}
