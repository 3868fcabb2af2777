// crates/console/src/commands/mod.rs
//! Command implementations. Each function maps one subcommand to API calls
//! and prints a plain-text rendering; errors bubble up as `anyhow::Error`
//! and exit the process nonzero without touching any other state.

pub mod admin;
pub mod dashboard;
pub mod media;
pub mod projects;

use chrono::NaiveDateTime;

/// Render a backend timestamp for table output. The backend emits naive
/// ISO-8601 strings; anything unparseable is shown as-is.
pub(crate) fn fmt_ts(ts: Option<&str>) -> String {
    match ts {
        None => "-".to_string(),
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Truncate a cell to `max` characters with an ellipsis.
pub(crate) fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{head}…")
}
