//! Per-player rating trajectory: peak, chart series, event history.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::parse_record_date;
use crate::models::{HistoryRecord, BASELINE_RATING};

/// One point of the rating progression chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub rating: Option<f64>,
    pub event_name: String,
    /// Difference to the previous point (or the baseline for the first point).
    pub rating_change: Option<f64>,
    pub rank_at_event: Option<u32>,
}

/// Everything derived from one player's history.
#[derive(Debug, Clone)]
pub struct PlayerDerivation<'a> {
    pub peak_rating: f64,
    /// Oldest first, one point per record.
    pub chart: Vec<ChartPoint>,
    /// All records, newest first.
    pub newest_first: Vec<&'a HistoryRecord>,
    /// Newest first, ranked participations only.
    pub ranked_events: Vec<&'a HistoryRecord>,
}

/// Sort records oldest first.
///
/// Undated records go after dated ones. Ties are broken by event name, rank
/// and rating so the result never depends on input order.
pub fn sort_chronologically(records: &mut Vec<&HistoryRecord>) {
    let mut keyed: Vec<(Option<NaiveDateTime>, &HistoryRecord)> = records
        .iter()
        .map(|r| (r.event_date.as_deref().and_then(parse_record_date), *r))
        .collect();
    keyed.sort_by(|(da, a), (db, b)| {
        let by_date = match (da, db) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date
            .then_with(|| a.event_name.cmp(&b.event_name))
            .then_with(|| rank_key(a).cmp(&rank_key(b)))
            .then_with(|| rating_key(a).total_cmp(&rating_key(b)))
    });
    *records = keyed.into_iter().map(|(_, r)| r).collect();
}

fn rank_key(record: &HistoryRecord) -> u32 {
    record.rank_at_event.unwrap_or(u32::MAX)
}

fn rating_key(record: &HistoryRecord) -> f64 {
    record.rating().unwrap_or(f64::NEG_INFINITY)
}

/// Derive a player's peak rating, chart series and event lists.
///
/// `current_rating` is the peak when the history holds no valid rating.
pub fn derive_player<'a, I>(records: I, current_rating: f64) -> PlayerDerivation<'a>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut chronological: Vec<&'a HistoryRecord> = records.into_iter().collect();
    sort_chronologically(&mut chronological);

    let mut peak: Option<f64> = None;
    let mut chart = Vec::with_capacity(chronological.len());

    for (i, record) in chronological.iter().enumerate() {
        let rating = record.rating();
        if let Some(r) = rating {
            peak = Some(peak.unwrap_or(0.0).max(r));
        }

        let previous = if i > 0 {
            chronological[i - 1].rating()
        } else {
            Some(BASELINE_RATING)
        };

        chart.push(ChartPoint {
            timestamp: record
                .event_date
                .as_deref()
                .and_then(parse_record_date)
                .map(|dt| dt.and_utc()),
            rating,
            event_name: record.event_name.clone(),
            rating_change: rating.zip(previous).map(|(now, before)| now - before),
            rank_at_event: record.rank_at_event,
        });
    }

    let newest_first: Vec<&'a HistoryRecord> = chronological.into_iter().rev().collect();
    let ranked_events = newest_first
        .iter()
        .copied()
        .filter(|r| r.rank_at_event.is_some())
        .collect();

    PlayerDerivation {
        peak_rating: peak.unwrap_or(current_rating),
        chart,
        newest_first,
        ranked_events,
    }
}
