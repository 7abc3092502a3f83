//! Event difficulty tiers.

use serde::{Deserialize, Serialize};

/// Difficulty of an event, bucketed from its average participant rating.
///
/// Variants are declared in ascending order, so `Ord` follows difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Unknown,
    Noob,
    Novice,
    Beginner,
    Apprentice,
    Developing,
    Intermediate,
    Proficient,
    Advanced,
    Skilled,
    Expert,
    Master,
    Legendary,
}

/// Inclusive lower bounds, highest first. The first bound reached wins.
const TIER_THRESHOLDS: [(f64, DifficultyTier); 11] = [
    (1600.0, DifficultyTier::Legendary),
    (1500.0, DifficultyTier::Master),
    (1400.0, DifficultyTier::Expert),
    (1300.0, DifficultyTier::Skilled),
    (1200.0, DifficultyTier::Advanced),
    (1100.0, DifficultyTier::Proficient),
    (1000.0, DifficultyTier::Intermediate),
    (900.0, DifficultyTier::Developing),
    (800.0, DifficultyTier::Apprentice),
    (700.0, DifficultyTier::Beginner),
    (600.0, DifficultyTier::Novice),
];

impl DifficultyTier {
    /// Tier for an event's average rating. Zero or non-numeric averages are `Unknown`.
    pub fn from_average_rating(average: f64) -> Self {
        if average == 0.0 || !average.is_finite() {
            return DifficultyTier::Unknown;
        }
        TIER_THRESHOLDS
            .iter()
            .find(|(bound, _)| average >= *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(DifficultyTier::Noob)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Unknown => "Unknown",
            DifficultyTier::Noob => "Noob",
            DifficultyTier::Novice => "Novice",
            DifficultyTier::Beginner => "Beginner",
            DifficultyTier::Apprentice => "Apprentice",
            DifficultyTier::Developing => "Developing",
            DifficultyTier::Intermediate => "Intermediate",
            DifficultyTier::Proficient => "Proficient",
            DifficultyTier::Advanced => "Advanced",
            DifficultyTier::Skilled => "Skilled",
            DifficultyTier::Expert => "Expert",
            DifficultyTier::Master => "Master",
            DifficultyTier::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(DifficultyTier::from_average_rating(1600.0), DifficultyTier::Legendary);
        assert_eq!(DifficultyTier::from_average_rating(1599.99), DifficultyTier::Master);
        assert_eq!(DifficultyTier::from_average_rating(1000.0), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::from_average_rating(999.99), DifficultyTier::Developing);
        assert_eq!(DifficultyTier::from_average_rating(600.0), DifficultyTier::Novice);
        assert_eq!(DifficultyTier::from_average_rating(599.0), DifficultyTier::Noob);
    }

    #[test]
    fn test_tier_unknown() {
        assert_eq!(DifficultyTier::from_average_rating(0.0), DifficultyTier::Unknown);
        assert_eq!(DifficultyTier::from_average_rating(f64::NAN), DifficultyTier::Unknown);
    }

    #[test]
    fn test_every_threshold_maps_to_next_tier() {
        let expected = [
            (650.0, "Novice"),
            (750.0, "Beginner"),
            (850.0, "Apprentice"),
            (950.0, "Developing"),
            (1050.0, "Intermediate"),
            (1150.0, "Proficient"),
            (1250.0, "Advanced"),
            (1350.0, "Skilled"),
            (1450.0, "Expert"),
            (1550.0, "Master"),
            (2400.0, "Legendary"),
        ];
        for (avg, label) in expected {
            assert_eq!(DifficultyTier::from_average_rating(avg).label(), label, "avg {avg}");
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(DifficultyTier::Legendary > DifficultyTier::Master);
        assert!(DifficultyTier::Noob > DifficultyTier::Unknown);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(format!("{}", DifficultyTier::Proficient), "Proficient");
    }
}
