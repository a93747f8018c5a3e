/// End-to-end tests: the full toggle flow over a real SQLite store
use chrono::{DateTime, NaiveTime, Utc};
use dailytornado::*;
use std::path::PathBuf;

/// Clock pinned to a fixed instant
struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    fn at(rfc3339: &str) -> Box<Self> {
        Box::new(Self {
            instant: rfc3339.parse().unwrap(),
        })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

fn engine_on(path: PathBuf, rfc3339: &str) -> HabitEngine<SqliteStore> {
    let store = SqliteStore::new(path).expect("Failed to open store");
    HabitEngine::new(store, FixedClock::at(rfc3339), Motivator::canned())
}

fn sample_habit(reminder: Option<NaiveTime>) -> Habit {
    Habit::new(
        "Morning Run 5k".to_string(),
        Some("Start the day with energy.".to_string()),
        Category::Fitness,
        reminder,
        Utc::now(),
    )
    .expect("Failed to create habit")
}

#[test]
fn test_toggle_flow_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let habit_id = {
        let engine = engine_on(db_path.clone(), "2024-01-07T09:00:00Z");
        let habit = sample_habit(None);
        let id = habit.id.clone();
        engine.add_habit(habit).unwrap();

        let outcome = engine.toggle_today(&id).unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.stats.streak, 1);
        id
    };

    // A fresh engine over the same database sees the committed state
    let engine = engine_on(db_path, "2024-01-07T10:00:00Z");
    let habits = engine.habits().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].id, habit_id);
    assert_eq!(habits[0].streak, 1);
    assert!(habits[0].is_completed_on("2024-01-07".parse().unwrap()));
}

#[test]
fn test_consecutive_days_build_a_streak() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let habit = sample_habit(None);
    let habit_id = habit.id.clone();
    engine_on(db_path.clone(), "2024-01-01T08:00:00Z")
        .add_habit(habit)
        .unwrap();

    // One toggle per day across a week, each through a fresh engine
    for day in 1..=7 {
        let engine = engine_on(db_path.clone(), &format!("2024-01-{:02}T08:00:00Z", day));
        let outcome = engine.toggle_today(&habit_id).unwrap();
        assert_eq!(outcome.stats.streak, day as u32);
    }

    let engine = engine_on(db_path, "2024-01-07T20:00:00Z");
    let habits = engine.habits().unwrap();
    assert_eq!(habits[0].streak, 7);
    assert_eq!(habits[0].best_streak, 7);
}

#[test]
fn test_achievements_unlock_once_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let habit = sample_habit(None);
    let habit_id = habit.id.clone();
    engine_on(db_path.clone(), "2024-01-01T08:00:00Z")
        .add_habit(habit)
        .unwrap();

    let mut unlocked_ids = Vec::new();
    for day in 1..=3 {
        let engine = engine_on(db_path.clone(), &format!("2024-01-{:02}T08:00:00Z", day));
        let outcome = engine.toggle_today(&habit_id).unwrap();
        unlocked_ids.extend(outcome.unlocked.iter().map(|r| r.id));
    }

    // Day 1 breaks the (zero) record, day 3 reaches the 3-day streak
    assert!(unlocked_ids.contains(&"best_streak_record"));
    assert!(unlocked_ids.contains(&"streak_3"));

    // Ids never repeat across the whole run
    let mut deduped = unlocked_ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), unlocked_ids.len());

    // Achievement notifications made it into the persisted log
    let engine = engine_on(db_path, "2024-01-03T09:00:00Z");
    let log = engine.notifications().unwrap();
    assert!(log
        .entries()
        .iter()
        .any(|n| n.kind == NotificationKind::Achievement));
}

#[test]
fn test_integrity_repair_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let habit = sample_habit(None);
    let habit_id = habit.id.clone();
    {
        let engine = engine_on(db_path.clone(), "2024-01-07T09:00:00Z");
        engine.add_habit(habit).unwrap();
        engine.toggle_today(&habit_id).unwrap();
    }

    // Two days later the cached streak is stale; loading repairs it
    let engine = engine_on(db_path, "2024-01-09T09:00:00Z");
    let habits = engine.load_and_repair().unwrap();
    assert_eq!(habits[0].streak, 0);
    assert_eq!(habits[0].best_streak, 1);
}

#[tokio::test]
async fn test_reminder_poll_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let engine = engine_on(db_path, "2024-01-07T07:00:05Z");
    engine
        .add_habit(sample_habit(NaiveTime::from_hms_opt(7, 0, 0)))
        .unwrap();

    let emitted = engine.check_reminders().await.unwrap();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].kind, NotificationKind::Reminder);

    // Second poll in the same minute is deduplicated
    let again = engine.check_reminders().await.unwrap();
    assert!(again.is_empty());

    // And the reminder is in the persisted history
    let log = engine.notifications().unwrap();
    assert_eq!(log.entries().len(), 1);
}

#[test]
fn test_mark_notification_read() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tornado.db");

    let engine = engine_on(db_path, "2024-01-07T09:00:00Z");
    let habit = sample_habit(None);
    let habit_id = habit.id.clone();
    engine.add_habit(habit).unwrap();
    engine.toggle_today(&habit_id).unwrap();

    let log = engine.notifications().unwrap();
    let first_id = log.entries()[0].id.clone();

    assert!(engine.mark_notification_read(&first_id).unwrap());
    assert!(!engine.mark_notification_read("no-such-id").unwrap());

    let log = engine.notifications().unwrap();
    assert!(log.entries()[0].read);
}
