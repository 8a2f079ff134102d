use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub target_value: i32,
    pub unit: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One record per habit per calendar day. `(habit_id, date)` is the key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HabitProgress {
    pub habit_id: Uuid,
    pub date: String,
    pub current_value: i32,
    pub is_completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Target value must be positive"))]
    pub target_value: Option<i32>,
    #[validate(length(max = 32, message = "Unit too long"))]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Target value must be positive"))]
    pub target_value: Option<i32>,
    #[validate(length(max = 32, message = "Unit too long"))]
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HabitListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogProgressRequest {
    pub habit_id: Uuid,
    /// Defaults to today.
    pub date: Option<String>,
    #[validate(range(min = 0, message = "Progress value cannot be negative"))]
    pub current_value: i32,
}

#[derive(Debug, Deserialize)]
pub struct ToggleProgressRequest {
    pub habit_id: Uuid,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreakQuery {
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StreakInfo {
    pub habit_id: Uuid,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_days: usize,
}

#[derive(Debug, Serialize)]
pub struct HabitWithStatus {
    #[serde(flatten)]
    pub habit: Habit,
    pub today_value: i32,
    pub is_complete: bool,
    pub progress_percentage: u8,
    pub current_streak: u32,
}
