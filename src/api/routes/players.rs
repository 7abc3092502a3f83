use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{derive_player, ChartPoint};
use crate::format::{format_rating, format_rating_change, strip_date_from_event_name};
use crate::logos::{avatar_path, LogoResolver};
use crate::models::{slugify, HistoryRecord};
use crate::storage::DataSet;

/// Medal class for top-three finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    pub fn from_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Podium::Gold),
            2 => Some(Podium::Silver),
            3 => Some(Podium::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartPointView {
    #[serde(flatten)]
    pub point: ChartPoint,
    pub rating_change_display: Option<String>,
}

impl From<ChartPoint> for ChartPointView {
    fn from(point: ChartPoint) -> Self {
        let rating_change_display = point.rating_change.map(format_rating_change);
        Self {
            point,
            rating_change_display,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub event_name: String,
    pub event_date: Option<String>,
    pub rating_after: Option<f64>,
    pub rank_at_event: Option<u32>,
}

impl From<&HistoryRecord> for HistoryRow {
    fn from(r: &HistoryRecord) -> Self {
        Self {
            event_name: r.event_name.clone(),
            event_date: r.event_date.clone(),
            rating_after: r.rating(),
            rank_at_event: r.rank_at_event,
        }
    }
}

/// A ranked participation, linked to its event page.
#[derive(Debug, Serialize)]
pub struct EventHistoryRow {
    pub event_name: String,
    pub display_name: String,
    pub slug: String,
    pub logo: String,
    pub rank: u32,
    pub podium: Option<Podium>,
}

#[derive(Debug, Serialize)]
pub struct PlayerProfileResponse {
    pub player_name: String,
    pub avatar: String,
    pub rank: u32,
    pub rating: f64,
    pub rating_display: String,
    pub peak_rating: f64,
    pub peak_rating_display: String,
    pub chart: Vec<ChartPointView>,
    pub history: Vec<HistoryRow>,
    pub event_history: Vec<EventHistoryRow>,
}

/// Profile for a leaderboard player. `None` when the name is not on the leaderboard,
/// even if history records exist for it.
pub fn player_profile(
    data: &DataSet,
    logos: &LogoResolver,
    name: &str,
) -> Option<PlayerProfileResponse> {
    let player = data.player(name)?;
    let derived = derive_player(data.player_history(name), player.rating);

    let event_history = derived
        .ranked_events
        .iter()
        .filter_map(|r| {
            let rank = r.rank_at_event?;
            Some(EventHistoryRow {
                event_name: r.event_name.clone(),
                display_name: strip_date_from_event_name(&r.event_name),
                slug: slugify(&r.event_name),
                logo: logos.resolve(&r.event_name).to_string(),
                rank,
                podium: Podium::from_rank(rank),
            })
        })
        .collect();

    Some(PlayerProfileResponse {
        player_name: player.player_name.clone(),
        avatar: avatar_path(&player.player_name),
        rank: player.rank,
        rating: player.rating,
        rating_display: format_rating(player.rating),
        peak_rating: derived.peak_rating,
        peak_rating_display: format_rating(derived.peak_rating),
        chart: derived.chart.into_iter().map(ChartPointView::from).collect(),
        history: derived.newest_first.into_iter().map(HistoryRow::from).collect(),
        event_history,
    })
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerProfileResponse>, ApiError> {
    player_profile(&state.data, &state.logos, &name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{get_json, sample_data, test_app};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_podium() {
        assert_eq!(Podium::from_rank(1), Some(Podium::Gold));
        assert_eq!(Podium::from_rank(3), Some(Podium::Bronze));
        assert_eq!(Podium::from_rank(4), None);
    }

    #[test]
    fn test_player_profile() {
        let data = sample_data();
        let profile = player_profile(&data, &LogoResolver::default(), "Carol").unwrap();

        assert_eq!(profile.rank, 3);
        assert_eq!(profile.peak_rating, 990.25);
        assert_eq!(profile.peak_rating_display, "990.25");
        assert_eq!(profile.chart.len(), 2);
        assert_eq!(profile.chart[0].rating_change_display.as_deref(), Some("-20"));
        assert_eq!(profile.history[0].event_name, "Rating Decay");
        // The decay record has no rank and is left out of the event list.
        assert_eq!(profile.event_history.len(), 1);
        assert_eq!(profile.event_history[0].podium, Some(Podium::Bronze));
    }

    #[test]
    fn test_history_without_leaderboard_entry() {
        let data = DataSet::from_records(
            vec![],
            vec![HistoryRecord::new("Ghost", "E").with_rating(1000.0).with_rank(1)],
        );
        assert!(player_profile(&data, &LogoResolver::default(), "Ghost").is_none());
    }

    #[tokio::test]
    async fn test_get_player() {
        let (status, json) = get_json(test_app(), "/api/players/Alice").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player_name"], "Alice");
        assert_eq!(json["rating_display"], "1250.50");
        assert_eq!(json["peak_rating"], 1250.5);
        assert_eq!(json["avatar"], "/avatars/Alice.png");

        let chart = json["chart"].as_array().unwrap();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0]["event_name"], "Block Wars (1/10/2024)");
        assert_eq!(chart[0]["rating_change_display"], "+100");
        assert_eq!(chart[1]["rating_change"], 150.5);

        let events = json["event_history"].as_array().unwrap();
        assert_eq!(events[0]["slug"], "showdown-3-2-2024");
        assert_eq!(events[0]["podium"], "silver");
        assert_eq!(events[1]["display_name"], "Block Wars");
        assert_eq!(events[1]["podium"], "gold");
    }

    #[tokio::test]
    async fn test_get_player_not_found() {
        let (status, json) = get_json(test_app(), "/api/players/alice").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Not found: Player not found");
    }
}
