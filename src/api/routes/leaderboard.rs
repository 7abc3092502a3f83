use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::format::format_rating;
use crate::logos::avatar_path;
use crate::models::LeaderboardRecord;
use crate::storage::DataSet;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PlayerRow {
    pub rank: u32,
    pub player_name: String,
    pub rating: f64,
    pub rating_display: String,
    pub avatar: String,
}

impl From<&LeaderboardRecord> for PlayerRow {
    fn from(p: &LeaderboardRecord) -> Self {
        Self {
            rank: p.rank,
            player_name: p.player_name.clone(),
            rating: p.rating,
            rating_display: format_rating(p.rating),
            avatar: avatar_path(&p.player_name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub players: Vec<PlayerRow>,
    pub pagination: PaginationMeta,
}

/// Leaderboard rows matching `search`, in leaderboard order.
pub fn search_leaderboard(data: &DataSet, search: &str) -> Vec<PlayerRow> {
    data.search_players(search).map(PlayerRow::from).collect()
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let rows = search_leaderboard(&state.data, params.search.as_deref().unwrap_or(""));

    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, rows.len() as u32);

    Ok(Json(LeaderboardResponse {
        players: pagination.apply(rows),
        pagination: meta,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{get_json, sample_data, test_app};
    use axum::http::StatusCode;

    #[test]
    fn test_search_leaderboard() {
        let data = sample_data();
        let rows = search_leaderboard(&data, "o");
        let names: Vec<_> = rows.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol"]);
        assert_eq!(rows[1].rating_display, "990.25");
        assert_eq!(rows[1].avatar, "/avatars/Carol.png");
    }

    #[tokio::test]
    async fn test_list_players() {
        let (status, json) = get_json(test_app(), "/api/leaderboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["players"].as_array().unwrap().len(), 3);
        assert_eq!(json["players"][0]["player_name"], "Alice");
        assert_eq!(json["players"][0]["rating_display"], "1250.50");
        assert_eq!(json["pagination"]["total_items"], 3);
    }

    #[tokio::test]
    async fn test_list_players_search_and_page() {
        let (status, json) =
            get_json(test_app(), "/api/leaderboard?search=ALI&page=1&page_size=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["players"].as_array().unwrap().len(), 1);
        assert_eq!(json["players"][0]["rank"], 1);

        let (_, json) = get_json(test_app(), "/api/leaderboard?page=2&page_size=2").await;
        assert_eq!(json["players"][0]["player_name"], "Carol");
        assert_eq!(json["pagination"]["has_prev"], true);
        assert_eq!(json["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn test_list_players_page_past_the_end() {
        let (status, json) =
            get_json(test_app(), "/api/leaderboard?page=50000000&page_size=100").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["players"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["total_items"], 3);
    }
}
