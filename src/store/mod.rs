//! Persistence seam.
//!
//! Handlers only ever see `dyn Store`. `PgStore` backs a real deployment,
//! `MemoryStore` backs tests and database-less runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::habit::{Habit, HabitProgress};
use crate::models::hydration::{HydrationIntake, HydrationSettings};
use crate::models::mood::MoodEntry;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub target_value: i32,
    pub unit: String,
}

#[derive(Default)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<i32>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Habits ordered by creation time.
    async fn list_habits(&self, include_inactive: bool) -> StoreResult<Vec<Habit>>;
    async fn get_habit(&self, id: Uuid) -> StoreResult<Option<Habit>>;
    async fn create_habit(&self, habit: NewHabit) -> StoreResult<Habit>;
    async fn update_habit(&self, id: Uuid, changes: HabitChanges) -> StoreResult<Option<Habit>>;
    /// Soft enable/disable. Progress history is never touched.
    async fn set_habit_active(&self, id: Uuid, active: bool) -> StoreResult<Option<Habit>>;

    /// Progress records, all habits when `habit_id` is `None`, oldest day first.
    async fn habit_progress(&self, habit_id: Option<Uuid>) -> StoreResult<Vec<HabitProgress>>;
    async fn progress_for_day(&self, habit_id: Uuid, date: &str) -> StoreResult<Option<HabitProgress>>;
    /// Insert or replace the record for `(habit_id, date)`.
    async fn upsert_progress(&self, progress: HabitProgress) -> StoreResult<HabitProgress>;

    /// Mood entries, newest first.
    async fn mood_entries(&self, date: Option<&str>) -> StoreResult<Vec<MoodEntry>>;
    async fn add_mood_entry(&self, entry: MoodEntry) -> StoreResult<MoodEntry>;
    async fn delete_mood_entry(&self, id: Uuid) -> StoreResult<bool>;

    /// Intake records, newest first.
    async fn hydration_intake(&self, date: Option<&str>) -> StoreResult<Vec<HydrationIntake>>;
    async fn add_hydration_intake(&self, intake: HydrationIntake) -> StoreResult<HydrationIntake>;

    /// Saved settings, or the defaults when nothing has been saved yet.
    async fn hydration_settings(&self) -> StoreResult<HydrationSettings>;
    async fn save_hydration_settings(&self, settings: HydrationSettings) -> StoreResult<HydrationSettings>;

    async fn ping(&self) -> StoreResult<()>;
}
