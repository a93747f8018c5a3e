/// Basic unit tests to verify core functionality through the public API
use chrono::{NaiveDate, Utc};
use dailytornado::*;
use std::collections::BTreeSet;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day(key: &str) -> NaiveDate {
        date_key::parse_key(key).unwrap()
    }

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(
            "Test Habit".to_string(),
            Some("A test habit".to_string()),
            Category::Health,
            None,
            Utc::now(),
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.title, "Test Habit");
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn test_date_key_codec() {
        assert_eq!(date_key::to_key(day("2024-01-07")), "2024-01-07");
        assert_eq!(date_key::day_before("2024-01-07").unwrap(), "2024-01-06");
        assert!(date_key::parse_key("2024-02-30").is_err());
    }

    #[test]
    fn test_streak_summary_on_empty_set() {
        let summary = StreakSummary::compute(&BTreeSet::new(), day("2024-01-07"));
        assert_eq!(summary.streak, 0);
        assert_eq!(summary.best_streak, 0);
        assert_eq!(summary.last_completed, None);
    }

    #[test]
    fn test_milestone_tiers() {
        assert!(is_milestone(7));
        assert!(!is_milestone(8));
        assert_eq!(milestone_tier(9), Some(MilestoneTier::Minor));
        assert_eq!(milestone_tier(30), Some(MilestoneTier::Major));
    }

    #[test]
    fn test_achievement_table_lookup() {
        assert!(rule_by_id("streak_7").is_some());
        assert!(rule_by_id("no_such_rule").is_none());
        assert_eq!(ACHIEVEMENTS.len(), 8);
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(store.is_ok());
    }

    #[test]
    fn test_engine_creation() {
        let store = MemoryStore::new();
        let engine = HabitEngine::new(store, Box::new(SystemClock), Motivator::canned());
        assert!(engine.habits().unwrap().is_empty());
    }
}
