/// Engine orchestration: the day-toggle flow, achievement unlocking,
/// reminder polling, and the load-time integrity pass
///
/// All state transitions commit synchronously against the store; generated
/// motivational copy is decoration applied afterwards and can never roll
/// back or delay committed state.

use std::future::Future;
use std::time::Duration;

use chrono::Timelike;

use crate::clock::Clock;
use crate::domain::{Habit, HabitId, StreakSummary};
use crate::gamification::{
    milestone_tier, AchievementRule, CompletionEvent, MilestoneTier, UnlockRecord, ACHIEVEMENTS,
};
use crate::motivation::{MessageContext, Motivator};
use crate::notify::{Notification, NotificationKind, NotificationLog};
use crate::storage::{KeyValueStore, Repository};
use crate::EngineError;

/// How often the reminder poll runs
const REMINDER_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// The outcome of toggling a habit's completion for today
#[derive(Debug)]
pub struct ToggleOutcome {
    /// The habit after the toggle, cached fields refreshed
    pub habit: Habit,
    /// True when the toggle marked today complete (false: it was undone)
    pub completed: bool,
    /// The freshly computed streak summary
    pub stats: StreakSummary,
    /// Celebration tier for the new streak, when the day was completed
    pub milestone: Option<MilestoneTier>,
    /// Achievements newly unlocked by this completion, in rule-table order
    pub unlocked: Vec<&'static AchievementRule>,
}

/// The streak/gamification engine
///
/// Owns a repository over the injected key-value store, a reference clock,
/// and the motivational-copy collaborator. Single-threaded by construction:
/// every operation is a synchronous read/transform/write, apart from the
/// decorative message generation.
pub struct HabitEngine<S: KeyValueStore> {
    repo: Repository<S>,
    clock: Box<dyn Clock + Send + Sync>,
    motivator: Motivator,
}

impl<S: KeyValueStore> HabitEngine<S> {
    pub fn new(store: S, clock: Box<dyn Clock + Send + Sync>, motivator: Motivator) -> Self {
        Self {
            repo: Repository::new(store),
            clock,
            motivator,
        }
    }

    /// Load all habits, repairing stale cached streak fields
    ///
    /// Cached fields are a materialized view of the completion set; if any
    /// disagree with a full recompute (say, the app was closed across
    /// midnight), they are corrected and written back. Logged, never
    /// surfaced.
    pub fn load_and_repair(&self) -> Result<Vec<Habit>, EngineError> {
        let today = self.clock.today();
        let mut habits = self.repo.habits()?;
        let mut repaired = false;

        for habit in &mut habits {
            if !habit.stats_in_sync(today) {
                let stats = StreakSummary::compute(&habit.completions, today);
                tracing::warn!(
                    "Integrity mismatch for habit '{}': cached streak {} -> {}",
                    habit.title,
                    habit.streak,
                    stats.streak
                );
                habit.apply(stats);
                repaired = true;
            }
        }

        if repaired {
            self.repo.save_habits(&habits)?;
        }

        Ok(habits)
    }

    /// All habits as currently stored
    pub fn habits(&self) -> Result<Vec<Habit>, EngineError> {
        Ok(self.repo.habits()?)
    }

    /// Add a new habit
    pub fn add_habit(&self, habit: Habit) -> Result<(), EngineError> {
        let mut habits = self.repo.habits()?;
        habits.push(habit);
        self.repo.save_habits(&habits)?;
        Ok(())
    }

    /// Replace a stored habit with an edited copy
    pub fn update_habit(&self, updated: Habit) -> Result<(), EngineError> {
        let mut habits = self.repo.habits()?;
        let habit = habits
            .iter_mut()
            .find(|h| h.id == updated.id)
            .ok_or_else(|| EngineError::HabitNotFound {
                habit_id: updated.id.to_string(),
            })?;
        *habit = updated;
        self.repo.save_habits(&habits)?;
        Ok(())
    }

    /// Delete a habit and its completion history
    pub fn remove_habit(&self, habit_id: &HabitId) -> Result<(), EngineError> {
        let mut habits = self.repo.habits()?;
        let before = habits.len();
        habits.retain(|h| &h.id != habit_id);
        if habits.len() == before {
            return Err(EngineError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }
        self.repo.save_habits(&habits)?;
        Ok(())
    }

    /// Toggle today's completion for a habit
    ///
    /// This is the main state transition: mutate the completion set,
    /// recompute the streak summary, persist the habit, then (only when the
    /// day was just completed) run achievement rules against the event
    /// snapshot and append the resulting notifications. Everything here is
    /// committed before any motivational text is generated.
    pub fn toggle_today(&self, habit_id: &HabitId) -> Result<ToggleOutcome, EngineError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut habits = self.repo.habits()?;
        let index = habits
            .iter()
            .position(|h| &h.id == habit_id)
            .ok_or_else(|| EngineError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })?;

        // Snapshot before mutation: the record-breaker rule compares
        // against the best streak as it stood before this event.
        let previous_best_streak = habits[index].best_streak;

        let completed = habits[index].toggle(today);
        let stats = StreakSummary::compute(&habits[index].completions, today);
        habits[index].apply(stats);
        self.repo.save_habits(&habits)?;

        if !completed {
            // Undoing a completion never unlocks or celebrates anything
            return Ok(ToggleOutcome {
                habit: habits[index].clone(),
                completed: false,
                stats,
                milestone: None,
                unlocked: Vec::new(),
            });
        }

        let total_lifetime_completions: u32 = habits
            .iter()
            .map(|h| h.completions.len() as u32)
            .sum();

        let event = CompletionEvent {
            streak_just_achieved: stats.streak,
            total_lifetime_completions,
            previous_best_streak,
        };
        let unlocked = self.evaluate_achievements(&event)?;

        let habit = habits[index].clone();
        let mut log = self.repo.notification_log()?;

        for rule in &unlocked {
            log.push(Notification::new(
                format!("🏆 Achievement Unlocked: {}", rule.title),
                rule.description.to_string(),
                now,
                NotificationKind::Achievement,
                None,
            ));
        }

        let milestone = milestone_tier(stats.streak);
        if milestone == Some(MilestoneTier::Major) {
            log.push(Notification::new(
                format!("🌟 {} Day Milestone!", stats.streak),
                format!(
                    "You've hit a {}-day streak on {}. Keep the fire burning!",
                    stats.streak, habit.title
                ),
                now,
                NotificationKind::Motivation,
                Some(habit.id.clone()),
            ));
        }

        self.repo.save_notification_log(&log)?;

        Ok(ToggleOutcome {
            habit,
            completed: true,
            stats,
            milestone,
            unlocked,
        })
    }

    /// Run the achievement rule table against one event snapshot
    ///
    /// Each rule is checked independently; ids already in the unlock set
    /// are skipped, and each new unlock record is persisted before the id
    /// is reported. A crash between unlock and notification can lose the
    /// notification, never duplicate the unlock.
    pub fn evaluate_achievements(
        &self,
        event: &CompletionEvent,
    ) -> Result<Vec<&'static AchievementRule>, EngineError> {
        let mut unlocked = self.repo.unlocked_achievements()?;
        let mut newly_unlocked = Vec::new();

        for rule in ACHIEVEMENTS {
            if !rule.is_triggered(event) {
                continue;
            }
            if unlocked.iter().any(|u| u.achievement_id == rule.id) {
                continue;
            }

            unlocked.push(UnlockRecord {
                achievement_id: rule.id.to_string(),
                unlocked_at: self.clock.now(),
            });
            self.repo.save_unlocked_achievements(&unlocked)?;

            tracing::info!("Achievement unlocked: {} ({})", rule.title, rule.id);
            newly_unlocked.push(rule);
        }

        Ok(newly_unlocked)
    }

    /// Produce the celebratory popup copy for a toggle outcome
    ///
    /// Purely decorative: state is already committed by `toggle_today`, and
    /// generation failures quietly degrade to canned copy. Returns None when
    /// the toggle undid a completion.
    pub async fn celebrate(&self, outcome: &ToggleOutcome) -> Option<String> {
        if !outcome.completed {
            return None;
        }

        let streak = outcome.stats.streak;
        let message = match outcome.milestone {
            Some(_) => {
                self.motivator
                    .message_for(&outcome.habit, MessageContext::Streak(streak))
                    .await
            }
            None => {
                self.motivator
                    .message_for(&outcome.habit, MessageContext::Completion)
                    .await
            }
        };

        Some(match outcome.milestone {
            Some(MilestoneTier::Major) => {
                format!("🎉 AMAZING! {} Day Streak! {}", streak, message)
            }
            Some(MilestoneTier::Minor) => format!("🔥 {} Day Streak! {}", streak, message),
            None => message,
        })
    }

    /// One reminder poll tick
    ///
    /// Re-reads habit state from the store immediately before deciding, so a
    /// habit completed manually in the same tick is not reminded about.
    /// Emitted reminders pass through the deduplicator first.
    pub async fn check_reminders(&self) -> Result<Vec<Notification>, EngineError> {
        let now = self.clock.now();
        let today = self.clock.today();
        let time = now.time();

        let habits = self.repo.habits()?;
        let mut log = self.repo.notification_log()?;
        let mut emitted = Vec::new();

        for habit in &habits {
            let Some(reminder_time) = habit.reminder_time else {
                continue;
            };
            if (reminder_time.hour(), reminder_time.minute()) != (time.hour(), time.minute()) {
                continue;
            }
            if habit.is_completed_on(today) {
                continue;
            }
            if !log.should_emit(NotificationKind::Reminder, Some(&habit.id), now) {
                continue;
            }

            let message = self
                .motivator
                .message_for(habit, MessageContext::Reminder)
                .await;
            let notification = Notification::new(
                format!("Time to {}", habit.title),
                message,
                now,
                NotificationKind::Reminder,
                Some(habit.id.clone()),
            );

            log.push(notification.clone());
            emitted.push(notification);
        }

        if !emitted.is_empty() {
            self.repo.save_notification_log(&log)?;
        }

        Ok(emitted)
    }

    /// Run the reminder poll until the shutdown future resolves
    ///
    /// The loop must stop when the owning context is torn down; callers pass
    /// a shutdown future (e.g. ctrl-c) and the ticker is dropped with it.
    pub async fn run_reminders<F>(&self, shutdown: F) -> Result<(), EngineError>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(REMINDER_POLL_INTERVAL);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let emitted = self.check_reminders().await?;
                    for notification in &emitted {
                        tracing::info!("Reminder due: {}", notification.title);
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Reminder loop stopped");
                    return Ok(());
                }
            }
        }
    }

    /// The current notification history
    pub fn notifications(&self) -> Result<NotificationLog, EngineError> {
        Ok(self.repo.notification_log()?)
    }

    /// Mark one notification as read
    pub fn mark_notification_read(&self, id: &str) -> Result<bool, EngineError> {
        let mut log = self.repo.notification_log()?;
        let found = log.mark_read(id);
        if found {
            self.repo.save_notification_log(&log)?;
        }
        Ok(found)
    }

    /// Full data reset: habits, notifications, and achievement unlocks
    pub fn reset(&self) -> Result<(), EngineError> {
        tracing::warn!("Resetting all engine data");
        Ok(self.repo.reset()?)
    }
}
