/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do every day, along with its completion history and the
/// cached streak fields derived from it.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, StreakSummary};

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass some other entity's id where a habit ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful when loading from the store)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Categories for organizing habits into different life areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Sleep, diet, hydration
    Health,
    /// Reading, courses, deliberate practice
    Study,
    /// Exercise and training
    Fitness,
    /// Personal growth and self-improvement
    Growth,
    /// Career and deep-work habits
    Work,
    /// Meditation, reflection, gratitude
    Mindfulness,
}

impl Category {
    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Study => "Study",
            Category::Fitness => "Fitness",
            Category::Growth => "Growth",
            Category::Work => "Work",
            Category::Mindfulness => "Mindfulness",
        }
    }
}

/// A habit represents something the user wants to do every day
///
/// Each habit owns its set of completed days. The `streak`, `best_streak`
/// and `last_completed` fields are a materialized view of that set: they
/// must always equal what `StreakSummary::compute` would produce, and are
/// recomputed after every mutation and repaired at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display title (e.g., "Morning Run 5k")
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Category for organization and filtering
    pub category: Category,
    /// Optional daily reminder time (hour and minute matter, seconds ignored)
    pub reminder_time: Option<NaiveTime>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// Cached current streak
    pub streak: u32,
    /// Cached best streak ever achieved
    pub best_streak: u32,
    /// Cached most recent completed day
    pub last_completed: Option<NaiveDate>,
    /// Days on which this habit was completed
    pub completions: BTreeSet<NaiveDate>,
}

impl Habit {
    /// Create a new habit with validation
    pub fn new(
        title: String,
        description: Option<String>,
        category: Category,
        reminder_time: Option<NaiveTime>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_description(&description)?;

        Ok(Self {
            id: HabitId::new(),
            title,
            description,
            category,
            reminder_time,
            created_at,
            streak: 0,
            best_streak: 0,
            last_completed: None,
            completions: BTreeSet::new(),
        })
    }

    /// Update the habit's editable properties with validation
    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<Option<String>>,
        category: Option<Category>,
        reminder_time: Option<Option<NaiveTime>>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_title) = title {
            Self::validate_title(new_title)?;
        }
        if let Some(ref new_description) = description {
            Self::validate_description(new_description)?;
        }

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_category) = category {
            self.category = new_category;
        }
        if let Some(new_reminder_time) = reminder_time {
            self.reminder_time = new_reminder_time;
        }

        Ok(())
    }

    /// Toggle the completion for a single day
    ///
    /// Adds the day if absent, removes it if present. Returns true when the
    /// day is now marked complete. The caller is responsible for refreshing
    /// the cached streak fields afterwards via `apply`.
    pub fn toggle(&mut self, day: NaiveDate) -> bool {
        if self.completions.remove(&day) {
            false
        } else {
            self.completions.insert(day);
            true
        }
    }

    /// Check whether a given day is marked complete
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completions.contains(&day)
    }

    /// Refresh the cached streak fields from a freshly computed summary
    pub fn apply(&mut self, summary: StreakSummary) {
        self.streak = summary.streak;
        self.best_streak = summary.best_streak;
        self.last_completed = summary.last_completed;
    }

    /// Current cached streak fields as a summary
    pub fn cached_summary(&self) -> StreakSummary {
        StreakSummary {
            streak: self.streak,
            best_streak: self.best_streak,
            last_completed: self.last_completed,
        }
    }

    /// Check whether the cached fields agree with a full recompute
    pub fn stats_in_sync(&self, today: NaiveDate) -> bool {
        self.cached_summary() == StreakSummary::compute(&self.completions, today)
    }

    // Validation helper methods

    fn validate_title(title: &str) -> Result<(), DomainError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitTitle(
                "Habit title cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitTitle(
                "Habit title cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.len() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}
