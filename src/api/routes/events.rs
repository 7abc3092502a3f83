use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::{sort_events, EventAggregate, EventSortKey, SortDirection};
use crate::format::{
    extract_date_from_event_name, format_long_date, format_rating, parse_record_date,
    strip_date_from_event_name,
};
use crate::logos::{avatar_path, LogoResolver};
use crate::models::{slugify, DifficultyTier, HistoryRecord};
use crate::storage::DataSet;

#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub display_name: String,
    pub slug: String,
    /// Date embedded in the name, verbatim (`M/D/YYYY`)
    pub date: Option<String>,
    pub participant_count: u32,
    pub average_rating: f64,
    pub difficulty: DifficultyTier,
    pub logo: String,
}

impl EventSummary {
    pub fn new(event: &EventAggregate, logos: &LogoResolver) -> Self {
        Self {
            name: event.name.clone(),
            display_name: strip_date_from_event_name(&event.name),
            slug: slugify(&event.name),
            date: extract_date_from_event_name(&event.name).map(str::to_string),
            participant_count: event.participant_count,
            average_rating: event.average_rating,
            difficulty: event.difficulty,
            logo: logos.resolve(&event.name).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventSummary>,
    pub sort: EventSortKey,
    pub direction: SortDirection,
    pub pagination: PaginationMeta,
}

/// Sorted event list, filtered by a case-insensitive name search.
pub fn sorted_events(
    data: &DataSet,
    logos: &LogoResolver,
    search: &str,
    key: EventSortKey,
    direction: SortDirection,
) -> Vec<EventSummary> {
    let mut events = data.events().to_vec();
    sort_events(&mut events, key, direction);

    let query = search.to_lowercase();
    events
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&query))
        .map(|e| EventSummary::new(e, logos))
        .collect()
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Json<EventListResponse>, ApiError> {
    let key = match params.sort.as_deref() {
        Some(s) => s.parse::<EventSortKey>().map_err(ApiError::BadRequest)?,
        None => EventSortKey::default(),
    };
    let direction = match params.direction.as_deref() {
        Some(s) => s.parse::<SortDirection>().map_err(ApiError::BadRequest)?,
        None => SortDirection::default(),
    };

    let events = sorted_events(
        &state.data,
        &state.logos,
        params.search.as_deref().unwrap_or(""),
        key,
        direction,
    );

    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, events.len() as u32);

    Ok(Json(EventListResponse {
        events: pagination.apply(events),
        sort: key,
        direction,
        pagination: meta,
    }))
}

#[derive(Debug, Serialize)]
pub struct ParticipantRow {
    pub rank: Option<u32>,
    pub player_name: String,
    pub rating_after: Option<f64>,
    pub rating_display: Option<String>,
    pub avatar: String,
}

impl From<&HistoryRecord> for ParticipantRow {
    fn from(r: &HistoryRecord) -> Self {
        let rating = r.rating();
        Self {
            rank: r.rank_at_event,
            player_name: r.player_name.clone(),
            rating_after: rating,
            rating_display: rating.map(format_rating),
            avatar: avatar_path(&r.player_name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub summary: EventSummary,
    /// Calendar date of the event, e.g. "April 5, 2024"
    pub event_date: Option<String>,
    pub participants: Vec<ParticipantRow>,
}

/// Participants of an event ordered by rank; unranked entries go last.
pub fn ranked_participants<'a>(data: &'a DataSet, event_name: &'a str) -> Vec<&'a HistoryRecord> {
    let mut records: Vec<&HistoryRecord> = data.event_records(event_name).collect();
    records.sort_by_key(|r| r.rank_at_event.unwrap_or(u32::MAX));
    records
}

/// Full results for the event behind `slug`, or `None` for an unknown slug.
pub fn event_detail(data: &DataSet, logos: &LogoResolver, slug: &str) -> Option<EventDetailResponse> {
    let name = data.event_name_for_slug(slug)?;
    let event = data.event(name)?;
    let participants = ranked_participants(data, name);

    let event_date = participants
        .first()
        .and_then(|r| r.event_date.as_deref())
        .and_then(parse_record_date)
        .map(|dt| format_long_date(dt.date()));

    Some(EventDetailResponse {
        summary: EventSummary::new(event, logos),
        event_date,
        participants: participants.into_iter().map(ParticipantRow::from).collect(),
    })
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetailResponse>, ApiError> {
    event_detail(&state.data, &state.logos, &slug)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Event not found: {}", slug)))
}
