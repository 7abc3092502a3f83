//! Derived views over the rating history.
//!
//! Everything here is pure: inputs are borrowed, never mutated, and every
//! function is total over its domain.
//! - Event aggregates (participants, average rating, difficulty tier)
//! - Event list ordering by embedded date or average rating
//! - Player peak rating, chart series and event history

mod events;
mod players;

pub use events::*;
pub use players::*;
