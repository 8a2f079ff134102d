use serde::Serialize;

use crate::models::mood::MoodEntry;
use crate::wellness::hydration::HydrationSummary;

/// Home screen and widget summary for one day.
#[derive(Debug, Serialize)]
pub struct TodaySummary {
    pub date: String,
    pub active_habits: usize,
    pub completed_habits: usize,
    pub habit_completion_percentage: u8,
    pub best_streak: u32,
    pub hydration: HydrationSummary,
    pub latest_mood: Option<MoodEntry>,
    pub moods_last_7_days: usize,
}
