//! # mc-elo
//!
//! ELO leaderboard for Minecraft event players.
//!
//! ## Architecture
//!
//! - **models**: Source records (leaderboard, rating history), difficulty tiers, slugs
//! - **format**: Event-name dates and display formatting
//! - **calculate**: Event aggregation and per-player derivations
//! - **logos**: Event logo and player avatar paths
//! - **storage**: Source file loading and the indexed data set
//! - **fetch**: Avatar downloader
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod format;
pub mod logos;
pub mod models;
pub mod storage;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "6h", "30m", "90s", "250ms").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(n) = s.strip_suffix("ms") {
        return n.parse().ok().map(Duration::from_millis);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    Some(Duration::from_secs(num * multiplier))
}
