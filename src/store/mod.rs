pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::habit::{Habit, HabitPatch};
use crate::models::mood::{Mood, MoodEntry};

pub use memory::MemoryStore;

/// Failures at the repository boundary. These are the only error shapes a
/// store may surface; the HTTP layer maps them onto the taxonomy
/// (`NotFound` -> 404, `Unavailable` -> 503) without masking or retrying.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    /// The backing store failed or timed out. The in-memory store never
    /// raises this; durable implementations surface transport failures
    /// here, unchanged.
    #[allow(dead_code)]
    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository boundary for habits, habit logs, and mood entries.
///
/// Log entries are sparse: a `(habit, date)` pair has at most one entry and
/// absence reads as not-completed. Mutations on the same key are serialized
/// by the implementation and immediately visible to subsequent reads.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_habits(&self, owner: &str) -> StoreResult<Vec<Habit>>;

    async fn get_habit(&self, owner: &str, id: Uuid) -> StoreResult<Option<Habit>>;

    async fn create_habit(
        &self,
        owner: &str,
        name: String,
        description: Option<String>,
        goal: i32,
    ) -> StoreResult<Habit>;

    async fn update_habit(&self, owner: &str, id: Uuid, patch: HabitPatch) -> StoreResult<Habit>;

    /// Removes the habit and every one of its log entries as one step; no
    /// state is observable where one is gone and the other remains.
    async fn delete_habit(&self, owner: &str, id: Uuid) -> StoreResult<()>;

    /// Flips the completion flag for `(habit_id, date)` and returns the new
    /// state. Toggling twice restores the original state.
    async fn toggle(&self, owner: &str, habit_id: Uuid, date: NaiveDate) -> StoreResult<bool>;

    async fn is_completed(&self, owner: &str, habit_id: Uuid, date: NaiveDate)
        -> StoreResult<bool>;

    /// Completion flags aligned 1:1 with the supplied date sequence.
    async fn log_entries(
        &self,
        owner: &str,
        habit_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<(NaiveDate, bool)>>;

    async fn set_log_entry(
        &self,
        owner: &str,
        habit_id: Uuid,
        date: NaiveDate,
        completed: bool,
    ) -> StoreResult<()>;

    /// Mood entries in storage order (insertion order, assumed
    /// chronological).
    async fn list_moods(&self, owner: &str) -> StoreResult<Vec<MoodEntry>>;

    /// One entry per date per owner; a later write for the same date
    /// replaces the earlier one in place.
    async fn upsert_mood(
        &self,
        owner: &str,
        date: NaiveDate,
        mood: Mood,
        note: Option<String>,
    ) -> StoreResult<MoodEntry>;

    async fn delete_mood(&self, owner: &str, id: Uuid) -> StoreResult<()>;
}
