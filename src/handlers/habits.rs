use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::habit::{
    CreateHabitRequest, Habit, HabitListQuery, HabitProgress, HabitWithStatus, StreakInfo,
    StreakQuery, UpdateHabitRequest,
};
use crate::store::{HabitChanges, NewHabit};
use crate::wellness::streak;
use crate::AppState;

use super::resolve_day;

pub(crate) async fn find_habit(state: &AppState, habit_id: Uuid) -> AppResult<Habit> {
    state
        .store
        .get_habit(habit_id)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<HabitListQuery>,
) -> AppResult<Json<Vec<HabitWithStatus>>> {
    let today = state.clock.today();
    let habits = state.store.list_habits(query.include_inactive).await?;
    let progress = state.store.habit_progress(None).await?;

    let mut result = Vec::with_capacity(habits.len());
    for habit in habits {
        // Stored completion, the same flag streaks count.
        let (today_value, is_complete) = progress
            .iter()
            .find(|p| p.habit_id == habit.id && p.date == today)
            .map(|p| (p.current_value, p.is_completed))
            .unwrap_or((0, false));
        let current_streak = streak::current_streak(habit.id, &progress, &today)?;

        result.push(HabitWithStatus {
            is_complete,
            progress_percentage: streak::progress_percentage(today_value, habit.target_value),
            today_value,
            current_streak,
            habit,
        });
    }

    Ok(Json(result))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Habit>> {
    Ok(Json(find_habit(&state, habit_id).await?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()?;
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Habit name is required".into()));
    }

    let habit = state
        .store
        .create_habit(NewHabit {
            name: body.name.trim().to_string(),
            description: body.description.unwrap_or_default(),
            target_value: body.target_value.unwrap_or(1),
            unit: body.unit.unwrap_or_default(),
        })
        .await?;

    tracing::info!(habit_id = %habit.id, name = %habit.name, "Habit created");
    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<UpdateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()?;

    let habit = state
        .store
        .update_habit(
            habit_id,
            HabitChanges {
                name: body.name.map(|n| n.trim().to_string()),
                description: body.description,
                target_value: body.target_value,
                unit: body.unit,
                is_active: body.is_active,
            },
        )
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    Ok(Json(habit))
}

/// Soft delete: the habit is deactivated so its history survives.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state
        .store
        .set_habit_active(habit_id, false)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    tracing::info!(habit_id = %habit_id, "Habit deactivated");
    Ok(Json(serde_json::json!({ "deleted": true, "id": habit_id })))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Query(query): Query<StreakQuery>,
) -> AppResult<Json<StreakInfo>> {
    find_habit(&state, habit_id).await?;
    let today = resolve_day(&state, query.today)?;
    let records = state.store.habit_progress(Some(habit_id)).await?;

    Ok(Json(StreakInfo {
        habit_id,
        current_streak: streak::current_streak(habit_id, &records, &today)?,
        longest_streak: streak::longest_streak(habit_id, &records)?,
        completed_days: records.iter().filter(|r| r.is_completed).count(),
    }))
}

pub async fn list_progress(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Vec<HabitProgress>>> {
    find_habit(&state, habit_id).await?;
    Ok(Json(state.store.habit_progress(Some(habit_id)).await?))
}
