use axum::{
    extract::{Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::hydration::{
    AddIntakeRequest, AddIntakeResponse, DateQuery, HydrationIntake, HydrationSettings,
    ReminderSchedule, ToggleRemindersRequest,
};
use crate::notify::apply_plan;
use crate::wellness::hydration::{self, HydrationSummary};
use crate::wellness::reminders;
use crate::AppState;

use super::{check_day_filter, resolve_day};

pub async fn list_intake(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<HydrationIntake>>> {
    check_day_filter(query.date.as_deref())?;
    Ok(Json(state.store.hydration_intake(query.date.as_deref()).await?))
}

/// Append a drink and report whether this one carried the day past the goal.
///
/// The goal-reached notification fires only on that transition, so topping
/// up after the goal is already met stays quiet. Intake requests are
/// serialized so concurrent drinks cannot both claim the crossing.
pub async fn add_intake(
    State(state): State<AppState>,
    Json(body): Json<AddIntakeRequest>,
) -> AppResult<Json<AddIntakeResponse>> {
    body.validate()?;
    let date = resolve_day(&state, body.date)?;

    let _guard = state.intake_lock.lock().await;
    let settings = state.store.hydration_settings().await?;
    let goal = settings.daily_goal_ml as i64;
    let mut day_intake = state.store.hydration_intake(Some(&date)).await?;
    let before = hydration::daily_total(&day_intake, &date)?;

    let intake = state
        .store
        .add_hydration_intake(HydrationIntake {
            id: Uuid::new_v4(),
            date: date.clone(),
            amount_ml: body.amount_ml,
            timestamp: state.clock.timestamp(),
        })
        .await?;
    day_intake.push(intake.clone());

    let summary = hydration::summarize(&day_intake, &date, goal)?;
    let goal_just_reached = hydration::goal_reached_transition(before, summary.total_ml, goal);
    if goal_just_reached {
        state.dispatcher.notify_goal_reached(&summary).await;
    }

    tracing::info!(
        date = %date,
        amount_ml = intake.amount_ml,
        total_ml = summary.total_ml,
        "Water intake logged"
    );

    Ok(Json(AddIntakeResponse {
        intake,
        summary,
        goal_just_reached,
    }))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<HydrationSummary>> {
    let date = resolve_day(&state, query.date)?;
    Ok(Json(day_summary(&state, &date).await?))
}

pub(crate) async fn day_summary(state: &AppState, date: &str) -> AppResult<HydrationSummary> {
    let settings = state.store.hydration_settings().await?;
    let intake = state.store.hydration_intake(Some(date)).await?;
    Ok(hydration::summarize(&intake, date, settings.daily_goal_ml as i64)?)
}

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<HydrationSettings>> {
    Ok(Json(state.store.hydration_settings().await?))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<HydrationSettings>,
) -> AppResult<Json<HydrationSettings>> {
    body.validate()?;
    if body.start_time > body.end_time {
        tracing::warn!(
            start = body.start_time,
            end = body.end_time,
            "Reminder window starts after it ends; no reminders will be scheduled"
        );
    }
    let settings = state.store.save_hydration_settings(body).await?;
    reschedule(&state, &settings).await?;
    Ok(Json(settings))
}

pub async fn toggle_reminders(
    State(state): State<AppState>,
    Json(body): Json<ToggleRemindersRequest>,
) -> AppResult<Json<HydrationSettings>> {
    let settings = HydrationSettings {
        reminder_enabled: body.enabled,
        ..state.store.hydration_settings().await?
    };
    let settings = state.store.save_hydration_settings(settings).await?;
    reschedule(&state, &settings).await?;

    tracing::info!(enabled = body.enabled, "Hydration reminders toggled");
    Ok(Json(settings))
}

async fn reschedule(state: &AppState, settings: &HydrationSettings) -> AppResult<()> {
    let plan = reminders::plan(settings, state.clock.now(), state.config.reminder_mode)?;
    apply_plan(state.dispatcher.as_ref(), &plan).await;
    Ok(())
}

pub async fn get_reminders(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<ReminderSchedule>> {
    let date = resolve_day(&state, query.date)?;
    let settings = state.store.hydration_settings().await?;
    let reminders = reminders::schedule_for_day(&settings, &date)?;

    let now = state.clock.now();
    let next_reminder = if date == state.clock.today() {
        reminders::next_reminder(&settings, now)?
    } else {
        None
    };

    Ok(Json(ReminderSchedule {
        date,
        enabled: settings.reminder_enabled,
        reminders,
        next_reminder,
    }))
}
