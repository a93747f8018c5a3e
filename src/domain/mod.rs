/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, StreakSummary) and the
/// date-key codec. These types represent the fundamental concepts in our
/// habit tracking engine.

pub mod date_key;
pub mod habit;
pub mod streak;

// Re-export public types for easy access
pub use habit::*;
pub use streak::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit title: {0}")]
    InvalidHabitTitle(String),

    #[error("Invalid date key: {0}")]
    InvalidKey(String),
}
