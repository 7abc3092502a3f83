pub mod events;
pub mod leaderboard;
pub mod players;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub players: usize,
    pub events: usize,
    pub history_records: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        players: state.data.leaderboard().len(),
        events: state.data.events().len(),
        history_records: state.data.history().len(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::logos::LogoResolver;
    use crate::models::{HistoryRecord, LeaderboardRecord, DECAY_EVENT_NAME};
    use crate::storage::{DataSet, StorageConfig};

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub fn sample_data() -> DataSet {
        let leaderboard = vec![
            LeaderboardRecord::new("Alice", 1250.5, 1),
            LeaderboardRecord::new("Bob", 1080.0, 2),
            LeaderboardRecord::new("Carol", 990.25, 3),
        ];
        let history = vec![
            HistoryRecord::new("Alice", "Block Wars (1/10/2024)")
                .with_date("2024-01-10")
                .with_rating(1100.0)
                .with_rank(1),
            HistoryRecord::new("Bob", "Block Wars (1/10/2024)")
                .with_date("2024-01-10")
                .with_rating(1020.0)
                .with_rank(2),
            HistoryRecord::new("Carol", "Block Wars (1/10/2024)")
                .with_date("2024-01-10")
                .with_rating("980")
                .with_rank(3),
            HistoryRecord::new("Bob", "Showdown (3/2/2024)")
                .with_date("2024-03-02")
                .with_rating(1080.0)
                .with_rank(1),
            HistoryRecord::new("Alice", "Showdown (3/2/2024)")
                .with_date("2024-03-02")
                .with_rating(1250.5)
                .with_rank(2),
            HistoryRecord::new("Carol", DECAY_EVENT_NAME)
                .with_date("2024-04-01")
                .with_rating(990.25),
        ];
        DataSet::from_records(leaderboard, history)
    }

    pub fn test_app() -> axum::Router {
        let state = AppState::new(
            StorageConfig::default(),
            sample_data(),
            LogoResolver::default(),
        );
        build_router(state)
    }
}
