/// Achievement rules and unlock records
///
/// The rule table is fixed configuration, not user data. Each achievement
/// moves from locked to unlocked at most once for the lifetime of the app's
/// data; only a full data reset clears unlock records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of event a rule watches for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fires when the just-achieved streak reaches the threshold
    Streak,
    /// Fires when cumulative lifetime completions across all habits reach the threshold
    Total,
    /// Fires when the just-achieved streak beats the previous best streak
    Special,
}

/// How rare an achievement is, for display styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A single achievement rule
#[derive(Debug, Clone, Copy)]
pub struct AchievementRule {
    /// Stable identifier, used to key unlock records
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Display description
    pub description: &'static str,
    /// What this rule watches for
    pub trigger: Trigger,
    /// Threshold for streak/total triggers (nominal 1 for special rules)
    pub threshold: u32,
    /// Display rarity
    pub rarity: Rarity,
}

/// The full, fixed rule table, evaluated in order
pub const ACHIEVEMENTS: &[AchievementRule] = &[
    AchievementRule {
        id: "streak_3",
        title: "Fire Starter",
        description: "Reach a 3-day streak on any habit.",
        trigger: Trigger::Streak,
        threshold: 3,
        rarity: Rarity::Common,
    },
    AchievementRule {
        id: "streak_7",
        title: "Week Warrior",
        description: "Reach a 7-day streak on any habit.",
        trigger: Trigger::Streak,
        threshold: 7,
        rarity: Rarity::Common,
    },
    AchievementRule {
        id: "streak_30",
        title: "Monthly Master",
        description: "Reach a 30-day streak on any habit.",
        trigger: Trigger::Streak,
        threshold: 30,
        rarity: Rarity::Rare,
    },
    AchievementRule {
        id: "streak_100",
        title: "Centurion",
        description: "Reach a 100-day streak on any habit.",
        trigger: Trigger::Streak,
        threshold: 100,
        rarity: Rarity::Epic,
    },
    AchievementRule {
        id: "total_10",
        title: "Getting Started",
        description: "Complete 10 total habit logs.",
        trigger: Trigger::Total,
        threshold: 10,
        rarity: Rarity::Common,
    },
    AchievementRule {
        id: "total_100",
        title: "Dedicated Soul",
        description: "Complete 100 total habit logs.",
        trigger: Trigger::Total,
        threshold: 100,
        rarity: Rarity::Rare,
    },
    AchievementRule {
        id: "total_500",
        title: "Unstoppable Force",
        description: "Complete 500 total habit logs.",
        trigger: Trigger::Total,
        threshold: 500,
        rarity: Rarity::Epic,
    },
    AchievementRule {
        id: "best_streak_record",
        title: "Record Breaker",
        description: "Surpass your previous longest streak.",
        trigger: Trigger::Special,
        threshold: 1,
        rarity: Rarity::Legendary,
    },
];

/// Look up a rule by its stable id
pub fn rule_by_id(id: &str) -> Option<&'static AchievementRule> {
    ACHIEVEMENTS.iter().find(|rule| rule.id == id)
}

/// Snapshot of a completion event, as seen by the rule table
///
/// `previous_best_streak` is the habit's cached best streak from before this
/// event's mutation, so the record-breaker rule fires exactly at the moment
/// a record is first broken.
#[derive(Debug, Clone, Copy)]
pub struct CompletionEvent {
    /// The streak value the habit just reached
    pub streak_just_achieved: u32,
    /// Cumulative completions across all habits, including this one
    pub total_lifetime_completions: u32,
    /// The habit's best streak before this event was applied
    pub previous_best_streak: u32,
}

impl AchievementRule {
    /// Evaluate this rule against an event snapshot
    pub fn is_triggered(&self, event: &CompletionEvent) -> bool {
        match self.trigger {
            Trigger::Streak => event.streak_just_achieved >= self.threshold,
            Trigger::Total => event.total_lifetime_completions >= self.threshold,
            Trigger::Special => event.streak_just_achieved > event.previous_best_streak,
        }
    }
}

/// A persisted record of an unlocked achievement
///
/// Append-only, keyed by achievement id. Never mutated or deleted except by
/// a full data reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(streak: u32, total: u32, previous_best: u32) -> CompletionEvent {
        CompletionEvent {
            streak_just_achieved: streak,
            total_lifetime_completions: total,
            previous_best_streak: previous_best,
        }
    }

    #[test]
    fn test_streak_rule_fires_at_threshold() {
        let rule = rule_by_id("streak_7").unwrap();
        assert!(!rule.is_triggered(&event(6, 6, 6)));
        assert!(rule.is_triggered(&event(7, 7, 7)));
        assert!(rule.is_triggered(&event(12, 12, 12)));
    }

    #[test]
    fn test_total_rule_counts_across_habits() {
        let rule = rule_by_id("total_10").unwrap();
        assert!(!rule.is_triggered(&event(1, 9, 5)));
        assert!(rule.is_triggered(&event(1, 10, 5)));
    }

    #[test]
    fn test_record_breaker_compares_previous_best() {
        let rule = rule_by_id("best_streak_record").unwrap();

        // Equal to the old record is not a new record
        assert!(!rule.is_triggered(&event(5, 50, 5)));
        assert!(rule.is_triggered(&event(6, 50, 5)));

        // First-ever completion beats a zero record
        assert!(rule.is_triggered(&event(1, 1, 0)));
    }

    #[test]
    fn test_multiple_rules_can_fire_from_one_event() {
        let snapshot = event(7, 10, 6);
        let fired: Vec<&str> = ACHIEVEMENTS
            .iter()
            .filter(|rule| rule.is_triggered(&snapshot))
            .map(|rule| rule.id)
            .collect();

        assert!(fired.contains(&"streak_3"));
        assert!(fired.contains(&"streak_7"));
        assert!(fired.contains(&"total_10"));
        assert!(fired.contains(&"best_streak_record"));
        assert!(!fired.contains(&"streak_30"));
    }
}
