/// Typed collections over the key-value store
///
/// Each entity collection lives under a fixed key as a JSON document, the
/// way the app has always laid out its local store. A missing key decodes as
/// the empty collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::Habit;
use crate::gamification::UnlockRecord;
use crate::notify::NotificationLog;
use crate::storage::{KeyValueStore, StorageError};

const HABITS_KEY: &str = "habits_v1";
const NOTIFICATIONS_KEY: &str = "notifications_v1";
const ACHIEVEMENTS_KEY: &str = "achievements_v1";

/// Repository over an injected key-value store
pub struct Repository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn habits(&self) -> Result<Vec<Habit>, StorageError> {
        self.load(HABITS_KEY)
    }

    pub fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        self.save(HABITS_KEY, &habits)
    }

    pub fn notification_log(&self) -> Result<NotificationLog, StorageError> {
        self.load(NOTIFICATIONS_KEY)
    }

    pub fn save_notification_log(&self, log: &NotificationLog) -> Result<(), StorageError> {
        self.save(NOTIFICATIONS_KEY, log)
    }

    pub fn unlocked_achievements(&self) -> Result<Vec<UnlockRecord>, StorageError> {
        self.load(ACHIEVEMENTS_KEY)
    }

    pub fn save_unlocked_achievements(&self, records: &[UnlockRecord]) -> Result<(), StorageError> {
        self.save(ACHIEVEMENTS_KEY, &records)
    }

    /// Full data reset: every collection becomes empty
    ///
    /// Writing explicit empty collections (rather than deleting keys)
    /// prevents any seed/default path from repopulating on next load. This
    /// is the only operation that clears achievement unlock records.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.save_habits(&[])?;
        self.save_notification_log(&NotificationLog::new())?;
        self.save_unlocked_achievements(&[])?;
        Ok(())
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }
}
