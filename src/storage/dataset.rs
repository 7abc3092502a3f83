//! The loaded site data and its lookup indices.

use std::collections::HashMap;

use tracing::info;

use super::{JsonRecordReader, StorageConfig, StorageError};
use crate::calculate::{aggregate_events, EventAggregate};
use crate::models::{slugify, HistoryRecord, LeaderboardRecord};

/// Immutable view of both source files, indexed for lookups.
///
/// Built once at startup and shared (behind an `Arc`) by every request or
/// command for the rest of the process. There is no reload.
#[derive(Debug, Clone)]
pub struct DataSet {
    leaderboard: Vec<LeaderboardRecord>,
    history: Vec<HistoryRecord>,
    events: Vec<EventAggregate>,
    player_index: HashMap<String, usize>,
    history_index: HashMap<String, Vec<usize>>,
    event_index: HashMap<String, usize>,
    slug_index: HashMap<String, String>,
}

impl DataSet {
    /// Read both source files and build the indices.
    pub fn load(storage: &StorageConfig) -> Result<Self, StorageError> {
        let leaderboard =
            JsonRecordReader::<LeaderboardRecord>::new(storage.leaderboard_path()).read_all()?;
        let history = JsonRecordReader::<HistoryRecord>::new(storage.history_path()).read_all()?;

        let data = Self::from_records(leaderboard, history);
        info!(
            "Loaded {} players, {} history records, {} events from {:?}",
            data.leaderboard.len(),
            data.history.len(),
            data.events.len(),
            storage.public_dir
        );
        Ok(data)
    }

    /// Build from in-memory records.
    pub fn from_records(leaderboard: Vec<LeaderboardRecord>, history: Vec<HistoryRecord>) -> Self {
        let mut player_index = HashMap::with_capacity(leaderboard.len());
        for (i, player) in leaderboard.iter().enumerate() {
            player_index.entry(player.player_name.clone()).or_insert(i);
        }

        let mut history_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut slug_index: HashMap<String, String> = HashMap::new();
        for (i, record) in history.iter().enumerate() {
            history_index
                .entry(record.player_name.clone())
                .or_default()
                .push(i);

            // First record in file order claims a slug; later collisions lose.
            if record.is_event_entry() {
                slug_index
                    .entry(slugify(&record.event_name))
                    .or_insert_with(|| record.event_name.clone());
            }
        }

        let events = aggregate_events(&history);
        let event_index = events
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        Self {
            leaderboard,
            history,
            events,
            player_index,
            history_index,
            event_index,
            slug_index,
        }
    }

    pub fn leaderboard(&self) -> &[LeaderboardRecord] {
        &self.leaderboard
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Event aggregates in order of first appearance.
    pub fn events(&self) -> &[EventAggregate] {
        &self.events
    }

    /// Leaderboard entry by exact, case-sensitive name.
    pub fn player(&self, name: &str) -> Option<&LeaderboardRecord> {
        self.player_index.get(name).map(|&i| &self.leaderboard[i])
    }

    /// All history records for a player, in file order.
    pub fn player_history<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a HistoryRecord> {
        self.history_index
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.history[i])
    }

    pub fn event(&self, name: &str) -> Option<&EventAggregate> {
        self.event_index.get(name).map(|&i| &self.events[i])
    }

    /// Original event name for a slug.
    pub fn event_name_for_slug(&self, slug: &str) -> Option<&str> {
        self.slug_index.get(slug).map(String::as_str)
    }

    /// Every record for an event, in file order.
    pub fn event_records<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HistoryRecord> {
        self.history.iter().filter(move |r| r.event_name == name)
    }

    /// Leaderboard entries whose name contains `query`, ignoring case.
    pub fn search_players<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Iterator<Item = &'a LeaderboardRecord> {
        self.leaderboard
            .iter()
            .filter(move |p| p.matches_search(query))
    }
}
