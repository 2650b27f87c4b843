use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::habit::{Habit, HabitPatch};
use crate::models::mood::{Mood, MoodEntry};
use crate::store::{Store, StoreError, StoreResult};

/// In-memory store (for single-instance deployments and tests).
///
/// One lock guards the whole state: every mutation takes the write lock, so
/// read-modify-write sequences like toggle are serialized per key and each
/// write is visible to the next read. Completed log entries are a sparse
/// set; a missing `(habit, date)` pair reads as not completed.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    habits: Vec<Habit>,
    completed: HashSet<(Uuid, NaiveDate)>,
    moods: Vec<MoodEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn habit_mut(&mut self, owner: &str, id: Uuid) -> StoreResult<&mut Habit> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id && h.owner == owner)
            .ok_or_else(|| StoreError::NotFound("Habit not found".into()))
    }

    fn require_habit(&self, owner: &str, id: Uuid) -> StoreResult<()> {
        if self.habits.iter().any(|h| h.id == id && h.owner == owner) {
            Ok(())
        } else {
            Err(StoreError::NotFound("Habit not found".into()))
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_habits(&self, owner: &str) -> StoreResult<Vec<Habit>> {
        let state = self.state.read().await;
        Ok(state
            .habits
            .iter()
            .filter(|h| h.owner == owner)
            .cloned()
            .collect())
    }

    async fn get_habit(&self, owner: &str, id: Uuid) -> StoreResult<Option<Habit>> {
        let state = self.state.read().await;
        Ok(state
            .habits
            .iter()
            .find(|h| h.id == id && h.owner == owner)
            .cloned())
    }

    async fn create_habit(
        &self,
        owner: &str,
        name: String,
        description: Option<String>,
        goal: i32,
    ) -> StoreResult<Habit> {
        let now = Utc::now();
        let habit = Habit {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name,
            description,
            goal,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.write().await;
        state.habits.push(habit.clone());
        Ok(habit)
    }

    async fn update_habit(&self, owner: &str, id: Uuid, patch: HabitPatch) -> StoreResult<Habit> {
        let mut state = self.state.write().await;
        let habit = state.habit_mut(owner, id)?;
        if let Some(name) = patch.name {
            habit.name = name;
        }
        if let Some(description) = patch.description {
            habit.description = Some(description);
        }
        if let Some(goal) = patch.goal {
            habit.goal = goal;
        }
        habit.updated_at = Utc::now();
        Ok(habit.clone())
    }

    async fn delete_habit(&self, owner: &str, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.require_habit(owner, id)?;
        // Habit and its log entries go in the same critical section.
        state.habits.retain(|h| !(h.id == id && h.owner == owner));
        state.completed.retain(|(habit_id, _)| *habit_id != id);
        Ok(())
    }

    async fn toggle(&self, owner: &str, habit_id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        state.require_habit(owner, habit_id)?;
        let key = (habit_id, date);
        if state.completed.remove(&key) {
            Ok(false)
        } else {
            state.completed.insert(key);
            Ok(true)
        }
    }

    // Reads consult the sparse set directly: an unknown or deleted habit
    // simply has no completions, it is not an error.
    async fn is_completed(
        &self,
        _owner: &str,
        habit_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.completed.contains(&(habit_id, date)))
    }

    async fn log_entries(
        &self,
        _owner: &str,
        habit_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<(NaiveDate, bool)>> {
        let state = self.state.read().await;
        Ok(dates
            .iter()
            .map(|d| (*d, state.completed.contains(&(habit_id, *d))))
            .collect())
    }

    async fn set_log_entry(
        &self,
        owner: &str,
        habit_id: Uuid,
        date: NaiveDate,
        completed: bool,
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.require_habit(owner, habit_id)?;
        if completed {
            state.completed.insert((habit_id, date));
        } else {
            state.completed.remove(&(habit_id, date));
        }
        Ok(())
    }

    async fn list_moods(&self, owner: &str) -> StoreResult<Vec<MoodEntry>> {
        let state = self.state.read().await;
        Ok(state
            .moods
            .iter()
            .filter(|m| m.owner == owner)
            .cloned()
            .collect())
    }

    async fn upsert_mood(
        &self,
        owner: &str,
        date: NaiveDate,
        mood: Mood,
        note: Option<String>,
    ) -> StoreResult<MoodEntry> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .moods
            .iter_mut()
            .find(|m| m.owner == owner && m.date == date)
        {
            // Last write wins, storage position stays put.
            existing.mood = mood.as_str().to_string();
            existing.note = note;
            return Ok(existing.clone());
        }
        let entry = MoodEntry {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            date,
            mood: mood.as_str().to_string(),
            note,
        };
        state.moods.push(entry.clone());
        Ok(entry)
    }

    async fn delete_mood(&self, owner: &str, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let before = state.moods.len();
        state.moods.retain(|m| !(m.id == id && m.owner == owner));
        if state.moods.len() == before {
            return Err(StoreError::NotFound("Mood entry not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "default";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn store_with_habit() -> (MemoryStore, Habit) {
        let store = MemoryStore::new();
        let habit = store
            .create_habit(OWNER, "Run".into(), None, 20)
            .await
            .unwrap();
        (store, habit)
    }

    // ── toggle ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_toggle_is_an_involution() {
        let (store, habit) = store_with_habit().await;
        let d = date(2024, 3, 1);

        assert!(!store.is_completed(OWNER, habit.id, d).await.unwrap());
        assert!(store.toggle(OWNER, habit.id, d).await.unwrap());
        assert!(store.is_completed(OWNER, habit.id, d).await.unwrap());
        assert!(!store.toggle(OWNER, habit.id, d).await.unwrap());
        assert!(!store.is_completed(OWNER, habit.id, d).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_unknown_habit_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .toggle(OWNER, Uuid::new_v4(), date(2024, 3, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_toggle_is_scoped_to_owner() {
        let (store, habit) = store_with_habit().await;
        let err = store
            .toggle("someone-else", habit.id, date(2024, 3, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    // ── log entries ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_log_entries_align_with_supplied_dates() {
        let (store, habit) = store_with_habit().await;
        store.toggle(OWNER, habit.id, date(2024, 3, 2)).await.unwrap();

        let dates = [date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)];
        let entries = store.log_entries(OWNER, habit.id, &dates).await.unwrap();
        assert_eq!(
            entries,
            vec![
                (date(2024, 3, 1), false),
                (date(2024, 3, 2), true),
                (date(2024, 3, 3), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_set_log_entry_is_sparse() {
        let (store, habit) = store_with_habit().await;
        let d = date(2024, 3, 5);

        store.set_log_entry(OWNER, habit.id, d, true).await.unwrap();
        assert!(store.is_completed(OWNER, habit.id, d).await.unwrap());
        store.set_log_entry(OWNER, habit.id, d, false).await.unwrap();
        assert!(!store.is_completed(OWNER, habit.id, d).await.unwrap());
        // setting false when absent is a no-op, not an error
        store.set_log_entry(OWNER, habit.id, d, false).await.unwrap();
    }

    // ── delete cascade ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_delete_habit_cascades_to_log_entries() {
        let (store, habit) = store_with_habit().await;
        store.toggle(OWNER, habit.id, date(2024, 3, 1)).await.unwrap();
        store.toggle(OWNER, habit.id, date(2024, 3, 2)).await.unwrap();

        store.delete_habit(OWNER, habit.id).await.unwrap();

        assert!(store.list_habits(OWNER).await.unwrap().is_empty());
        // Any range read over the deleted habit comes back all false.
        let entries = store
            .log_entries(OWNER, habit.id, &[date(2024, 3, 1), date(2024, 3, 2)])
            .await
            .unwrap();
        assert!(entries.iter().all(|(_, completed)| !completed));
        assert!(!store
            .is_completed(OWNER, habit.id, date(2024, 3, 1))
            .await
            .unwrap());
    }

    // ── habits ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_habits_preserves_creation_order() {
        let store = MemoryStore::new();
        for name in ["Run", "Read", "Meditate"] {
            store
                .create_habit(OWNER, name.into(), None, 20)
                .await
                .unwrap();
        }
        let names: Vec<String> = store
            .list_habits(OWNER)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Run", "Read", "Meditate"]);
    }

    #[tokio::test]
    async fn test_update_habit_applies_patch() {
        let (store, habit) = store_with_habit().await;
        let updated = store
            .update_habit(
                OWNER,
                habit.id,
                HabitPatch {
                    name: Some("Jog".into()),
                    goal: Some(12),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Jog");
        assert_eq!(updated.goal, 12);
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_update_unknown_habit_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_habit(OWNER, Uuid::new_v4(), HabitPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    // ── moods ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upsert_mood_last_write_wins_per_date() {
        let store = MemoryStore::new();
        let d = date(2024, 3, 1);

        let first = store
            .upsert_mood(OWNER, d, Mood::Sad, None)
            .await
            .unwrap();
        let second = store
            .upsert_mood(OWNER, d, Mood::Happy, Some("better".into()))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let moods = store.list_moods(OWNER).await.unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].mood, "happy");
        assert_eq!(moods[0].note.as_deref(), Some("better"));
    }

    #[tokio::test]
    async fn test_upsert_mood_keeps_storage_order() {
        let store = MemoryStore::new();
        store
            .upsert_mood(OWNER, date(2024, 3, 1), Mood::Sad, None)
            .await
            .unwrap();
        store
            .upsert_mood(OWNER, date(2024, 3, 2), Mood::Neutral, None)
            .await
            .unwrap();
        // Rewriting day 1 must not move it past day 2.
        store
            .upsert_mood(OWNER, date(2024, 3, 1), Mood::Happy, None)
            .await
            .unwrap();

        let dates: Vec<NaiveDate> = store
            .list_moods(OWNER)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.date)
            .collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 2)]);
    }

    #[tokio::test]
    async fn test_delete_mood() {
        let store = MemoryStore::new();
        let entry = store
            .upsert_mood(OWNER, date(2024, 3, 1), Mood::Sad, None)
            .await
            .unwrap();
        store.delete_mood(OWNER, entry.id).await.unwrap();
        assert!(store.list_moods(OWNER).await.unwrap().is_empty());

        let err = store.delete_mood(OWNER, entry.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
