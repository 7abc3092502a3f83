//! Per-event aggregates and event list ordering.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format::parse_embedded_date;
use crate::models::{DifficultyTier, HistoryRecord};

/// Participation and strength summary for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAggregate {
    pub name: String,

    /// Participants with a numerically valid rating.
    pub participant_count: u32,

    /// Mean rating after the event; 0 when no participant has a valid rating.
    pub average_rating: f64,

    pub difficulty: DifficultyTier,
}

#[derive(Default)]
struct Accumulator {
    count: u32,
    sum: f64,
}

/// Aggregate the history by event name, in order of first appearance.
///
/// Decay entries and records without an event name are skipped entirely.
/// Records with an unreadable rating still make their event appear, but
/// count towards neither the participant total nor the average.
pub fn aggregate_events<'a, I>(history: I) -> Vec<EventAggregate>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut order: Vec<&'a str> = Vec::new();
    let mut totals: HashMap<&'a str, Accumulator> = HashMap::new();

    for record in history {
        if !record.is_event_entry() {
            continue;
        }
        let acc = totals.entry(record.event_name.as_str()).or_insert_with(|| {
            order.push(record.event_name.as_str());
            Accumulator::default()
        });
        if let Some(rating) = record.rating() {
            acc.count += 1;
            acc.sum += rating;
        }
    }

    order
        .into_iter()
        .map(|name| {
            let acc = &totals[name];
            let average_rating = if acc.count == 0 {
                0.0
            } else {
                acc.sum / acc.count as f64
            };
            EventAggregate {
                name: name.to_string(),
                participant_count: acc.count,
                average_rating,
                difficulty: DifficultyTier::from_average_rating(average_rating),
            }
        })
        .collect()
}

/// What the event list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSortKey {
    /// Date embedded in the event name, newest first.
    #[default]
    Date,
    /// Average participant rating, strongest first.
    Rating,
}

/// Direction toggle applied on top of the key's natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for EventSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(EventSortKey::Date),
            "rating" | "average_rating" => Ok(EventSortKey::Rating),
            other => Err(format!("unknown sort key '{}' (expected date or rating)", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown direction '{}' (expected asc or desc)", other)),
        }
    }
}

impl fmt::Display for EventSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSortKey::Date => write!(f, "date"),
            EventSortKey::Rating => write!(f, "rating"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Natural (descending) order for an event list key.
///
/// By date: newest embedded date first, undated events after all dated
/// ones, undated ties broken by reverse name order. By rating: highest
/// average first.
///
/// Names compare by bytes, not by locale collation, so uppercase sorts
/// before lowercase ("Beta" < "alpha") and accented letters sort after ASCII.
pub fn compare_events(a: &EventAggregate, b: &EventAggregate, key: EventSortKey) -> Ordering {
    match key {
        EventSortKey::Date => {
            match (parse_embedded_date(&a.name), parse_embedded_date(&b.name)) {
                (Some(da), Some(db)) => db.cmp(&da),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (None, None) => b.name.cmp(&a.name),
            }
        }
        EventSortKey::Rating => b.average_rating.total_cmp(&a.average_rating),
    }
}

/// Stable sort of an event list. `Asc` flips the comparator.
pub fn sort_events(events: &mut [EventAggregate], key: EventSortKey, direction: SortDirection) {
    events.sort_by(|a, b| {
        let ord = compare_events(a, b, key);
        match direction {
            SortDirection::Desc => ord,
            SortDirection::Asc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DECAY_EVENT_NAME;
    use pretty_assertions::assert_eq;

    fn record(event: &str, rating: &str) -> HistoryRecord {
        HistoryRecord::new("p", event).with_rating(rating)
    }

    fn aggregate(name: &str, average_rating: f64) -> EventAggregate {
        EventAggregate {
            name: name.to_string(),
            participant_count: 1,
            average_rating,
            difficulty: DifficultyTier::from_average_rating(average_rating),
        }
    }

    fn names(events: &[EventAggregate]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_undated_tie_break_is_bytewise() {
        let mut events = vec![aggregate("Beta Cup", 1000.0), aggregate("alpha cup", 1000.0)];
        sort_events(&mut events, EventSortKey::Date, SortDirection::Desc);
        assert_eq!(names(&events), vec!["alpha cup", "Beta Cup"]);
    }

    #[test]
    fn test_aggregate_excludes_decay() {
        let history = vec![
            record("E", "1000"),
            record("E", "1200"),
            record(DECAY_EVENT_NAME, "1"),
        ];
        let events = aggregate_events(&history);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "E");
        assert_eq!(events[0].participant_count, 2);
        assert_eq!(events[0].average_rating, 1100.0);
        assert_eq!(events[0].difficulty, DifficultyTier::Proficient);
    }

    #[test]
    fn test_aggregate_skips_invalid_ratings() {
        let history = vec![
            record("E", "1500"),
            record("E", "oops"),
            HistoryRecord::new("q", "E"),
        ];
        let events = aggregate_events(&history);

        assert_eq!(events[0].participant_count, 1);
        assert_eq!(events[0].average_rating, 1500.0);
    }

    #[test]
    fn test_aggregate_event_without_valid_ratings() {
        let history = vec![record("Ghost Event", "n/a")];
        let events = aggregate_events(&history);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].participant_count, 0);
        assert_eq!(events[0].average_rating, 0.0);
        assert_eq!(events[0].difficulty, DifficultyTier::Unknown);
    }

    #[test]
    fn test_aggregate_first_appearance_order() {
        let history = vec![
            record("B", "900"),
            record("A", "900"),
            record("", "900"),
            record("B", "1100"),
        ];
        let events = aggregate_events(&history);
        assert_eq!(names(&events), vec!["B", "A"]);
        assert_eq!(events[0].average_rating, 1000.0);
    }

    #[test]
    fn test_aggregate_does_not_mutate_input() {
        let history = vec![record("E", "1000"), record("E", "1200")];
        let before = history.clone();
        let _ = aggregate_events(&history);
        assert_eq!(history, before);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut events = vec![
            aggregate("Block Wars (1/5/2024)", 900.0),
            aggregate("Showdown", 900.0),
            aggregate("Biome Battle (3/2/2024)", 900.0),
            aggregate("Alpha Cup", 900.0),
            aggregate("Klyx Games (12/20/2023)", 900.0),
        ];
        sort_events(&mut events, EventSortKey::Date, SortDirection::Desc);

        assert_eq!(
            names(&events),
            vec![
                "Biome Battle (3/2/2024)",
                "Block Wars (1/5/2024)",
                "Klyx Games (12/20/2023)",
                "Showdown",
                "Alpha Cup",
            ]
        );
    }

    #[test]
    fn test_sort_by_date_ascending_flips() {
        let mut events = vec![
            aggregate("Block Wars (1/5/2024)", 900.0),
            aggregate("Showdown", 900.0),
            aggregate("Biome Battle (3/2/2024)", 900.0),
        ];
        sort_events(&mut events, EventSortKey::Date, SortDirection::Asc);

        assert_eq!(
            names(&events),
            vec!["Showdown", "Block Wars (1/5/2024)", "Biome Battle (3/2/2024)"]
        );
    }

    #[test]
    fn test_sort_by_rating() {
        let mut events = vec![
            aggregate("Low", 700.0),
            aggregate("High", 1400.0),
            aggregate("Mid", 1000.0),
        ];
        sort_events(&mut events, EventSortKey::Rating, SortDirection::Desc);
        assert_eq!(names(&events), vec!["High", "Mid", "Low"]);

        sort_events(&mut events, EventSortKey::Rating, SortDirection::Asc);
        assert_eq!(names(&events), vec!["Low", "Mid", "High"]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("date".parse::<EventSortKey>(), Ok(EventSortKey::Date));
        assert_eq!("Rating".parse::<EventSortKey>(), Ok(EventSortKey::Rating));
        assert!("players".parse::<EventSortKey>().is_err());
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("descending".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("up".parse::<SortDirection>().is_err());
    }
}
