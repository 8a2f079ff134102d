use axum::{extract::State, Json};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitProgress, LogProgressRequest, ToggleProgressRequest};
use crate::wellness::streak;
use crate::AppState;

use super::habits::find_habit;
use super::resolve_day;

async fn active_habit(state: &AppState, habit_id: uuid::Uuid) -> AppResult<Habit> {
    let habit = find_habit(state, habit_id).await?;
    if !habit.is_active {
        return Err(AppError::Validation("Habit is inactive".into()));
    }
    Ok(habit)
}

async fn save(state: &AppState, record: HabitProgress) -> AppResult<HabitProgress> {
    let record = state.store.upsert_progress(record).await?;
    state
        .dispatcher
        .notify_progress_changed(record.habit_id, &record.date)
        .await;
    Ok(record)
}

/// Record the value reached for a habit on a day, replacing any earlier value.
pub async fn log_progress(
    State(state): State<AppState>,
    Json(body): Json<LogProgressRequest>,
) -> AppResult<Json<HabitProgress>> {
    body.validate()?;
    let habit = active_habit(&state, body.habit_id).await?;
    let date = resolve_day(&state, body.date)?;

    let record = HabitProgress {
        habit_id: habit.id,
        date,
        current_value: body.current_value,
        is_completed: streak::is_completed(body.current_value, habit.target_value),
    };

    Ok(Json(save(&state, record).await?))
}

/// Flip completion for a day. Completing jumps to the target value,
/// un-completing resets to zero.
pub async fn toggle_progress(
    State(state): State<AppState>,
    Json(body): Json<ToggleProgressRequest>,
) -> AppResult<Json<HabitProgress>> {
    let habit = active_habit(&state, body.habit_id).await?;
    let date = resolve_day(&state, body.date)?;

    let was_completed = state
        .store
        .progress_for_day(habit.id, &date)
        .await?
        .map(|p| p.is_completed)
        .unwrap_or(false);

    let record = if was_completed {
        HabitProgress {
            habit_id: habit.id,
            date,
            current_value: 0,
            is_completed: false,
        }
    } else {
        HabitProgress {
            habit_id: habit.id,
            date,
            current_value: habit.target_value,
            is_completed: true,
        }
    };

    Ok(Json(save(&state, record).await?))
}
