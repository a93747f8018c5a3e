/// Notification entities and the deduplicator
///
/// Notifications are best-effort: unlock state and streaks are authoritative
/// elsewhere, a lost notification is acceptable. The log keeps bounded
/// retention and suppresses duplicate reminders fired within one trigger
/// minute.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::HabitId;

/// Oldest entries are evicted once the log grows past this cap
pub const MAX_NOTIFICATIONS: usize = 20;

/// Two notifications of the same kind for the same habit within this window
/// are considered duplicates
pub const SUPPRESSION_WINDOW_SECS: i64 = 60;

/// What produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Motivation,
    Streak,
    Achievement,
}

/// A single user-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub kind: NotificationKind,
    pub read: bool,
    pub related_habit_id: Option<HabitId>,
}

impl Notification {
    pub fn new(
        title: String,
        message: String,
        timestamp: DateTime<Utc>,
        kind: NotificationKind,
        related_habit_id: Option<HabitId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            message,
            timestamp,
            kind,
            read: false,
            related_habit_id,
        }
    }
}

/// The persisted notification history, newest last
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(|n| !n.read)
    }

    /// Append a notification, evicting the oldest past the retention cap
    pub fn push(&mut self, notification: Notification) {
        // Skip exact duplicates if rapid firing
        if self.entries.iter().any(|n| n.id == notification.id) {
            return;
        }
        self.entries.push(notification);
        if self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.remove(0);
        }
    }

    /// Decide whether a candidate notification should be emitted
    ///
    /// Returns false when an entry of the same kind and habit sits within
    /// the trailing suppression window of the candidate's timestamp. This is
    /// what keeps the periodic reminder poll from emitting the same reminder
    /// several times within one trigger minute.
    pub fn should_emit(
        &self,
        kind: NotificationKind,
        related_habit_id: Option<&HabitId>,
        at: DateTime<Utc>,
    ) -> bool {
        let window = Duration::seconds(SUPPRESSION_WINDOW_SECS);
        !self.entries.iter().any(|n| {
            n.kind == kind
                && n.related_habit_id.as_ref() == related_habit_id
                && (at - n.timestamp) < window
        })
    }

    /// Flip a notification's read flag. Returns false if the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }
}
