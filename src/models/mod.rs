//! Core data models: source records, event tiers and slugs.

mod history;
mod leaderboard;
mod slug;
mod tier;

pub use history::*;
pub use leaderboard::*;
pub use slug::*;
pub use tier::*;
