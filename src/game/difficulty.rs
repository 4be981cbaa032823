use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Speed setting for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 180ms per tick
    #[default]
    Easy,
    /// 100ms per tick
    Medium,
    /// 60ms per tick
    Hard,
}

impl Difficulty {
    /// Get the tick interval for this difficulty
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(180),
            Self::Medium => Duration::from_millis(100),
            Self::Hard => Duration::from_millis(60),
        }
    }

    /// The next setting, wrapping from hard back to easy
    pub fn next(&self) -> Difficulty {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_intervals() {
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(180));
        assert_eq!(Difficulty::Medium.tick_interval(), Duration::from_millis(100));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(60));
    }

    #[test]
    fn test_harder_is_faster() {
        assert!(Difficulty::Hard.tick_interval() < Difficulty::Medium.tick_interval());
        assert!(Difficulty::Medium.tick_interval() < Difficulty::Easy.tick_interval());
    }

    #[test]
    fn test_cycle_visits_every_level() {
        let mut level = Difficulty::default();
        assert_eq!(level, Difficulty::Easy);
        for expected in [Difficulty::Medium, Difficulty::Hard, Difficulty::Easy] {
            level = level.next();
            assert_eq!(level, expected);
        }
    }
}
