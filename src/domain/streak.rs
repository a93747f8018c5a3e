/// Streak calculation functionality
///
/// This module defines the StreakSummary struct that holds calculated streak
/// information for a habit, derived from its set of completed days. The
/// calculation is a pure function: the reference day ("today") is always
/// supplied by the caller, never read from a system clock.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calculated streak information for a habit
///
/// Habits cache these values as a materialized view; the engine recomputes
/// them after every completion-set mutation and at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Current consecutive days completed, ending at the most recent completion
    pub streak: u32,
    /// Best streak ever achieved across the full history
    pub best_streak: u32,
    /// The most recent completed day (None if never completed)
    pub last_completed: Option<NaiveDate>,
}

impl StreakSummary {
    /// An empty summary for a habit that has never been completed
    pub fn empty() -> Self {
        Self {
            streak: 0,
            best_streak: 0,
            last_completed: None,
        }
    }

    /// Calculate streak information from a set of completed days
    ///
    /// `today` anchors the current-streak check. A completion logged for
    /// today keeps the streak alive, and a streak only counts as broken once
    /// a full day has passed with no completion for either today or
    /// yesterday.
    pub fn compute(completions: &BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        if completions.is_empty() {
            return Self::empty();
        }

        // Best streak: walk the sorted days, extending a run whenever the
        // gap to the previous day is exactly one calendar day.
        let mut best_streak: u32 = 0;
        let mut run: u32 = 0;
        let mut prev: Option<NaiveDate> = None;

        for &day in completions {
            run = match prev {
                Some(p) if (day - p).num_days() == 1 => run + 1,
                _ => 1,
            };
            best_streak = best_streak.max(run);
            prev = Some(day);
        }

        // Current streak: anchored at the most recent completion. If that
        // day is neither today nor yesterday the chain is broken.
        let last_completed = completions.iter().next_back().copied();
        let yesterday = today - Duration::days(1);

        let mut streak: u32 = 0;
        if let Some(last) = last_completed {
            if last == today || last == yesterday {
                let mut expected = last;
                while completions.contains(&expected) {
                    streak += 1;
                    expected = expected - Duration::days(1);
                }
            }
        }

        Self {
            streak,
            best_streak,
            last_completed,
        }
    }
}
