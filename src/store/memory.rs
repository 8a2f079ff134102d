use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{HabitChanges, NewHabit, Store, StoreResult};
use crate::models::habit::{Habit, HabitProgress};
use crate::models::hydration::{HydrationIntake, HydrationSettings};
use crate::models::mood::MoodEntry;

#[derive(Default)]
struct Tables {
    habits: Vec<Habit>,
    progress: Vec<HabitProgress>,
    moods: Vec<MoodEntry>,
    intake: Vec<HydrationIntake>,
    settings: Option<HydrationSettings>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_habits(&self, include_inactive: bool) -> StoreResult<Vec<Habit>> {
        let tables = self.tables.read().await;
        let mut habits: Vec<Habit> = tables
            .habits
            .iter()
            .filter(|h| include_inactive || h.is_active)
            .cloned()
            .collect();
        habits.sort_by_key(|h| h.created_at);
        Ok(habits)
    }

    async fn get_habit(&self, id: Uuid) -> StoreResult<Option<Habit>> {
        let tables = self.tables.read().await;
        Ok(tables.habits.iter().find(|h| h.id == id).cloned())
    }

    async fn create_habit(&self, habit: NewHabit) -> StoreResult<Habit> {
        let now = Utc::now();
        let habit = Habit {
            id: Uuid::new_v4(),
            name: habit.name,
            description: habit.description,
            target_value: habit.target_value,
            unit: habit.unit,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.habits.push(habit.clone());
        Ok(habit)
    }

    async fn update_habit(&self, id: Uuid, changes: HabitChanges) -> StoreResult<Option<Habit>> {
        let mut tables = self.tables.write().await;
        let Some(habit) = tables.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            habit.name = name;
        }
        if let Some(description) = changes.description {
            habit.description = description;
        }
        if let Some(target_value) = changes.target_value {
            habit.target_value = target_value;
        }
        if let Some(unit) = changes.unit {
            habit.unit = unit;
        }
        if let Some(is_active) = changes.is_active {
            habit.is_active = is_active;
        }
        habit.updated_at = Utc::now();
        Ok(Some(habit.clone()))
    }

    async fn set_habit_active(&self, id: Uuid, active: bool) -> StoreResult<Option<Habit>> {
        self.update_habit(
            id,
            HabitChanges {
                is_active: Some(active),
                ..Default::default()
            },
        )
        .await
    }

    async fn habit_progress(&self, habit_id: Option<Uuid>) -> StoreResult<Vec<HabitProgress>> {
        let tables = self.tables.read().await;
        let mut records: Vec<HabitProgress> = tables
            .progress
            .iter()
            .filter(|p| habit_id.map_or(true, |id| p.habit_id == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }

    async fn progress_for_day(&self, habit_id: Uuid, date: &str) -> StoreResult<Option<HabitProgress>> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .iter()
            .find(|p| p.habit_id == habit_id && p.date == date)
            .cloned())
    }

    async fn upsert_progress(&self, progress: HabitProgress) -> StoreResult<HabitProgress> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .progress
            .iter()
            .position(|p| p.habit_id == progress.habit_id && p.date == progress.date);
        match slot {
            Some(i) => tables.progress[i] = progress.clone(),
            None => tables.progress.push(progress.clone()),
        }
        Ok(progress)
    }

    async fn mood_entries(&self, date: Option<&str>) -> StoreResult<Vec<MoodEntry>> {
        let tables = self.tables.read().await;
        let mut entries: Vec<MoodEntry> = tables
            .moods
            .iter()
            .filter(|e| date.map_or(true, |d| e.date == d))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn add_mood_entry(&self, entry: MoodEntry) -> StoreResult<MoodEntry> {
        self.tables.write().await.moods.push(entry.clone());
        Ok(entry)
    }

    async fn delete_mood_entry(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.moods.len();
        tables.moods.retain(|e| e.id != id);
        Ok(tables.moods.len() != before)
    }

    async fn hydration_intake(&self, date: Option<&str>) -> StoreResult<Vec<HydrationIntake>> {
        let tables = self.tables.read().await;
        let mut intake: Vec<HydrationIntake> = tables
            .intake
            .iter()
            .filter(|i| date.map_or(true, |d| i.date == d))
            .cloned()
            .collect();
        intake.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(intake)
    }

    async fn add_hydration_intake(&self, intake: HydrationIntake) -> StoreResult<HydrationIntake> {
        self.tables.write().await.intake.push(intake.clone());
        Ok(intake)
    }

    async fn hydration_settings(&self) -> StoreResult<HydrationSettings> {
        Ok(self.tables.read().await.settings.clone().unwrap_or_default())
    }

    async fn save_hydration_settings(&self, settings: HydrationSettings) -> StoreResult<HydrationSettings> {
        self.tables.write().await.settings = Some(settings.clone());
        Ok(settings)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
