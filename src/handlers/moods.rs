use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::mood::{CreateMoodRequest, MoodEntry, MoodQuery, MoodTrendQuery};
use crate::wellness::mood::{self, Mood, MoodTrendPoint};
use crate::AppState;

use super::{check_day_filter, resolve_day};

const DEFAULT_TREND_DAYS: u32 = 7;

pub async fn list_moods(
    State(state): State<AppState>,
    Query(query): Query<MoodQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    check_day_filter(query.date.as_deref())?;
    Ok(Json(state.store.mood_entries(query.date.as_deref()).await?))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<Json<MoodEntry>> {
    body.validate()?;
    let mood = Mood::try_from(body.mood)?;
    let date = resolve_day(&state, body.date)?;

    let entry = state
        .store
        .add_mood_entry(MoodEntry {
            id: Uuid::new_v4(),
            mood,
            emoji: body.emoji.unwrap_or_else(|| mood.emoji().to_string()),
            date,
            timestamp: state.clock.timestamp(),
        })
        .await?;

    tracing::info!(entry_id = %entry.id, mood = mood.label(), date = %entry.date, "Mood logged");
    Ok(Json(entry))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.store.delete_mood_entry(entry_id).await? {
        return Err(AppError::NotFound("Mood entry not found".into()));
    }
    Ok(Json(serde_json::json!({ "deleted": true, "id": entry_id })))
}

pub async fn mood_trend(
    State(state): State<AppState>,
    Query(query): Query<MoodTrendQuery>,
) -> AppResult<Json<Vec<MoodTrendPoint>>> {
    let today = state.clock.today();
    let entries = state.store.mood_entries(None).await?;
    let points = mood::trend(&entries, &today, query.days.unwrap_or(DEFAULT_TREND_DAYS))?;
    Ok(Json(points))
}
