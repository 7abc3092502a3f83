//! Rating history records (`rating_history_full.json`).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Event name of the synthetic rating-decay entries.
pub const DECAY_EVENT_NAME: &str = "Rating Decay";

/// Rating every player starts from before their first event.
pub const BASELINE_RATING: f64 = 1000.00;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// A rating as found in the source data: a JSON number, a string, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RatingValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    /// Any other JSON value (`true`, `{}`, `[]`). Kept so the record survives.
    Other(serde_json::Value),
}

impl RatingValue {
    /// Best-effort numeric value.
    ///
    /// Strings are read like a lenient float parser: leading whitespace is
    /// skipped and the longest numeric prefix is used ("1012.5 pts" is 1012.5).
    /// Returns `None` when nothing numeric can be read or the value is not finite.
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            RatingValue::Number(n) => Some(*n),
            RatingValue::Text(s) => parse_leading_float(s),
            RatingValue::Missing | RatingValue::Other(_) => None,
        };
        parsed.filter(|v| v.is_finite())
    }
}

impl From<f64> for RatingValue {
    fn from(v: f64) -> Self {
        RatingValue::Number(v)
    }
}

impl From<&str> for RatingValue {
    fn from(s: &str) -> Self {
        RatingValue::Text(s.to_string())
    }
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let m = LEADING_NUMBER.find(trimmed)?;
    m.as_str().parse().ok()
}

/// One player's participation in one event (or one decay step).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub player_name: String,

    #[serde(default, deserialize_with = "deserialize_event_name")]
    pub event_name: String,

    #[serde(default)]
    pub event_date: Option<String>,

    #[serde(default)]
    pub rating_after: RatingValue,

    /// Placement at the event. Absent, zero and unreadable ranks are all `None`.
    #[serde(default, deserialize_with = "deserialize_rank")]
    pub rank_at_event: Option<u32>,
}

impl HistoryRecord {
    pub fn new(player_name: &str, event_name: &str) -> Self {
        Self {
            player_name: player_name.to_string(),
            event_name: event_name.to_string(),
            event_date: None,
            rating_after: RatingValue::Missing,
            rank_at_event: None,
        }
    }

    /// Builder method to set the event date.
    pub fn with_date(mut self, date: &str) -> Self {
        self.event_date = Some(date.to_string());
        self
    }

    /// Builder method to set the rating after the event.
    pub fn with_rating(mut self, rating: impl Into<RatingValue>) -> Self {
        self.rating_after = rating.into();
        self
    }

    /// Builder method to set the rank at the event.
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank_at_event = (rank > 0).then_some(rank);
        self
    }

    /// Numerically valid rating after this event, if any.
    pub fn rating(&self) -> Option<f64> {
        self.rating_after.value()
    }

    pub fn is_decay(&self) -> bool {
        self.event_name == DECAY_EVENT_NAME
    }

    /// Whether this record takes part in event-facing views.
    pub fn is_event_entry(&self) -> bool {
        !self.event_name.is_empty() && !self.is_decay()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRank {
    Int(u64),
    Float(f64),
    Text(String),
    #[allow(dead_code)]
    Other(serde_json::Value),
}

/// Event names that are null or not strings read as empty.
fn deserialize_event_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn deserialize_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawRank>::deserialize(deserializer)?;
    let rank = match raw {
        Some(RawRank::Int(n)) => u32::try_from(n).ok(),
        Some(RawRank::Float(f)) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => {
            Some(f as u32)
        }
        Some(RawRank::Text(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(rank.filter(|r| *r > 0))
}
