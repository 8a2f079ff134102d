use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::wellness::mood::Mood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: Mood,
    pub emoji: String,
    pub date: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood: i32,
    /// Defaults to the mood's own emoji.
    #[validate(length(min = 1, max = 16, message = "Emoji must be 1-16 characters"))]
    pub emoji: Option<String>,
    /// Defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodTrendQuery {
    pub days: Option<u32>,
}
