use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{HabitChanges, NewHabit, Store, StoreResult};
use crate::models::habit::{Habit, HabitProgress};
use crate::models::hydration::{HydrationIntake, HydrationSettings};
use crate::models::mood::MoodEntry;

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_habits(&self, include_inactive: bool) -> StoreResult<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            r#"
            SELECT * FROM habits
            WHERE $1 OR is_active = true
            ORDER BY created_at ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.db)
        .await?;

        Ok(habits)
    }

    async fn get_habit(&self, id: Uuid) -> StoreResult<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(habit)
    }

    async fn create_habit(&self, habit: NewHabit) -> StoreResult<Habit> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (id, name, description, target_value, unit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(habit.target_value)
        .bind(&habit.unit)
        .fetch_one(&self.db)
        .await?;

        Ok(habit)
    }

    async fn update_habit(&self, id: Uuid, changes: HabitChanges) -> StoreResult<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            UPDATE habits SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                target_value = COALESCE($4, target_value),
                unit = COALESCE($5, unit),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.target_value)
        .bind(&changes.unit)
        .bind(changes.is_active)
        .fetch_optional(&self.db)
        .await?;

        Ok(habit)
    }

    async fn set_habit_active(&self, id: Uuid, active: bool) -> StoreResult<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(
            "UPDATE habits SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.db)
        .await?;

        Ok(habit)
    }

    async fn habit_progress(&self, habit_id: Option<Uuid>) -> StoreResult<Vec<HabitProgress>> {
        let records = sqlx::query_as::<_, HabitProgress>(
            r#"
            SELECT habit_id, date, current_value, is_completed FROM habit_progress
            WHERE $1::uuid IS NULL OR habit_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(habit_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn progress_for_day(&self, habit_id: Uuid, date: &str) -> StoreResult<Option<HabitProgress>> {
        let record = sqlx::query_as::<_, HabitProgress>(
            r#"
            SELECT habit_id, date, current_value, is_completed FROM habit_progress
            WHERE habit_id = $1 AND date = $2
            "#,
        )
        .bind(habit_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    async fn upsert_progress(&self, progress: HabitProgress) -> StoreResult<HabitProgress> {
        let record = sqlx::query_as::<_, HabitProgress>(
            r#"
            INSERT INTO habit_progress (habit_id, date, current_value, is_completed)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (habit_id, date) DO UPDATE SET
                current_value = EXCLUDED.current_value,
                is_completed = EXCLUDED.is_completed,
                updated_at = NOW()
            RETURNING habit_id, date, current_value, is_completed
            "#,
        )
        .bind(progress.habit_id)
        .bind(&progress.date)
        .bind(progress.current_value)
        .bind(progress.is_completed)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    async fn mood_entries(&self, date: Option<&str>) -> StoreResult<Vec<MoodEntry>> {
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT * FROM mood_entries
            WHERE $1::text IS NULL OR date = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn add_mood_entry(&self, entry: MoodEntry) -> StoreResult<MoodEntry> {
        let entry = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (id, mood, emoji, date, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.mood)
        .bind(&entry.emoji)
        .bind(&entry.date)
        .bind(entry.timestamp)
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    async fn delete_mood_entry(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn hydration_intake(&self, date: Option<&str>) -> StoreResult<Vec<HydrationIntake>> {
        let intake = sqlx::query_as::<_, HydrationIntake>(
            r#"
            SELECT * FROM hydration_intake
            WHERE $1::text IS NULL OR date = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(intake)
    }

    async fn add_hydration_intake(&self, intake: HydrationIntake) -> StoreResult<HydrationIntake> {
        let intake = sqlx::query_as::<_, HydrationIntake>(
            r#"
            INSERT INTO hydration_intake (id, date, amount_ml, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(intake.id)
        .bind(&intake.date)
        .bind(intake.amount_ml)
        .bind(intake.timestamp)
        .fetch_one(&self.db)
        .await?;

        Ok(intake)
    }

    async fn hydration_settings(&self) -> StoreResult<HydrationSettings> {
        let settings = sqlx::query_as::<_, HydrationSettings>(
            r#"
            SELECT daily_goal_ml, reminder_enabled, reminder_interval_minutes,
                   start_time, start_minute, end_time
            FROM hydration_settings WHERE id = 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(settings.unwrap_or_default())
    }

    async fn save_hydration_settings(&self, settings: HydrationSettings) -> StoreResult<HydrationSettings> {
        let settings = sqlx::query_as::<_, HydrationSettings>(
            r#"
            INSERT INTO hydration_settings
                (id, daily_goal_ml, reminder_enabled, reminder_interval_minutes,
                 start_time, start_minute, end_time)
            VALUES (1, $1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                daily_goal_ml = EXCLUDED.daily_goal_ml,
                reminder_enabled = EXCLUDED.reminder_enabled,
                reminder_interval_minutes = EXCLUDED.reminder_interval_minutes,
                start_time = EXCLUDED.start_time,
                start_minute = EXCLUDED.start_minute,
                end_time = EXCLUDED.end_time,
                updated_at = NOW()
            RETURNING daily_goal_ml, reminder_enabled, reminder_interval_minutes,
                      start_time, start_minute, end_time
            "#,
        )
        .bind(settings.daily_goal_ml)
        .bind(settings.reminder_enabled)
        .bind(settings.reminder_interval_minutes)
        .bind(settings.start_time)
        .bind(settings.start_minute)
        .bind(settings.end_time)
        .fetch_one(&self.db)
        .await?;

        Ok(settings)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
