use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::summary::TodaySummary;
use crate::wellness::{mood, percent_of, streak};
use crate::AppState;

use super::hydration::day_summary;

/// Dashboard numbers for today: habits, hydration and mood at a glance.
pub async fn today_summary(State(state): State<AppState>) -> AppResult<Json<TodaySummary>> {
    let today = state.clock.today();

    let habits = state.store.list_habits(false).await?;
    let progress = state.store.habit_progress(None).await?;
    let completed_habits = habits
        .iter()
        .filter(|h| {
            progress
                .iter()
                .any(|p| p.habit_id == h.id && p.date == today && p.is_completed)
        })
        .count();

    let moods = state.store.mood_entries(None).await?;

    Ok(Json(TodaySummary {
        active_habits: habits.len(),
        completed_habits,
        habit_completion_percentage: percent_of(completed_habits as i64, habits.len() as i64),
        best_streak: streak::best_current_streak(&habits, &progress, &today)?,
        hydration: day_summary(&state, &today).await?,
        latest_mood: mood::latest_on(&moods, &today).cloned(),
        moods_last_7_days: mood::count_last_week(&moods, &today)?,
        date: today,
    }))
}
