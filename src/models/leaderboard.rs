//! Current standings (`final_leaderboard.json`).

use serde::{Deserialize, Serialize};

/// A player's current standing. `Player_Name` is the canonical player key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    #[serde(rename = "Player_Name")]
    pub player_name: String,

    #[serde(rename = "Rating")]
    pub rating: f64,

    #[serde(rename = "Rank")]
    pub rank: u32,
}

impl LeaderboardRecord {
    pub fn new(player_name: &str, rating: f64, rank: u32) -> Self {
        Self {
            player_name: player_name.to_string(),
            rating,
            rank,
        }
    }

    /// Case-insensitive substring match used by leaderboard search.
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty()
            || self
                .player_name
                .to_lowercase()
                .contains(&query.to_lowercase())
    }
}
