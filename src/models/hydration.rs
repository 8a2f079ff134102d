use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A single drink event. Daily totals are always derived from these.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HydrationIntake {
    pub id: Uuid,
    pub date: String,
    pub amount_ml: i32,
    pub timestamp: DateTime<Utc>,
}

/// Singleton settings row, replaced wholesale on save.
///
/// `start_time`/`end_time` are hours of the day, `start_minute` the minute
/// of the first reminder. An end hour before the start hour is stored as-is
/// and produces an empty reminder window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq, Validate)]
pub struct HydrationSettings {
    #[validate(range(min = 1, message = "Daily goal must be positive"))]
    pub daily_goal_ml: i32,
    pub reminder_enabled: bool,
    #[validate(range(min = 1, max = 1440, message = "Reminder interval must be 1-1440 minutes"))]
    pub reminder_interval_minutes: i32,
    #[validate(range(min = 0, max = 23, message = "Start hour must be 0-23"))]
    pub start_time: i32,
    #[validate(range(min = 0, max = 59, message = "Start minute must be 0-59"))]
    pub start_minute: i32,
    #[validate(range(min = 0, max = 23, message = "End hour must be 0-23"))]
    pub end_time: i32,
}

impl Default for HydrationSettings {
    fn default() -> Self {
        Self {
            daily_goal_ml: 2000,
            reminder_enabled: false,
            reminder_interval_minutes: 60,
            start_time: 8,
            start_minute: 0,
            end_time: 22,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddIntakeRequest {
    #[validate(range(min = 1, max = 5000, message = "Amount must be 1-5000 ml"))]
    pub amount_ml: i32,
    /// Defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRemindersRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AddIntakeResponse {
    pub intake: HydrationIntake,
    pub summary: crate::wellness::hydration::HydrationSummary,
    /// True only for the request that carried the total past the goal.
    pub goal_just_reached: bool,
}

#[derive(Debug, Serialize)]
pub struct ReminderSchedule {
    pub date: String,
    pub enabled: bool,
    pub reminders: Vec<NaiveDateTime>,
    pub next_reminder: Option<NaiveDateTime>,
}
