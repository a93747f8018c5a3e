/// Public library interface for the Dailytornado streak engine
///
/// This crate implements the streak computation and gamification engine
/// behind the habit tracker: date-key handling, streak calculation,
/// milestone detection, one-time achievement unlocking, and reminder
/// notification deduplication, all over an injected local key-value store.

use thiserror::Error;

// Internal modules
mod clock;
mod domain;
mod engine;
mod gamification;
mod motivation;
mod notify;
mod storage;

// Re-export public modules and types
pub use clock::{Clock, SystemClock};
pub use domain::{date_key, Category, DomainError, Habit, HabitId, StreakSummary};
pub use engine::{HabitEngine, ToggleOutcome};
pub use gamification::{
    is_milestone, milestone_tier, rule_by_id, AchievementRule, CompletionEvent, MilestoneTier,
    Rarity, Trigger, UnlockRecord, ACHIEVEMENTS, MILESTONES,
};
pub use motivation::{
    GenerationError, MessageContext, MessageGenerator, Motivator, FALLBACK_MOTIVATION,
};
pub use notify::{
    Notification, NotificationKind, NotificationLog, MAX_NOTIFICATIONS, SUPPRESSION_WINDOW_SECS,
};
pub use storage::{KeyValueStore, MemoryStore, Repository, SqliteStore, StorageError};

/// Errors that can occur during engine operation
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },
}
