use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{CalendarWindow, Period};
use crate::error::{AppError, AppResult};
use crate::models::habit::{
    CreateHabitRequest, Habit, HabitPatch, UpdateHabitRequest, DEFAULT_GOAL,
};
use crate::scope::OwnerScope;
use crate::services::habits::{aggregate, HabitAggregate};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub period: Option<String>,
    pub anchor_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HabitLogsResponse {
    pub period: Period,
    pub label: String,
    pub dates: Vec<NaiveDate>,
    pub habits: Vec<HabitAggregate>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: Uuid,
    pub date: NaiveDate,
}

pub async fn list_habits(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
) -> AppResult<Json<Vec<Habit>>> {
    let habits = state.store.list_habits(&owner).await?;
    Ok(Json(habits))
}

pub async fn create_habit(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Habit name is required".into()));
    }
    let goal = body.goal.unwrap_or(DEFAULT_GOAL);
    if goal <= 0 {
        return Err(AppError::Validation("Goal must be a positive number".into()));
    }

    let habit = state
        .store
        .create_habit(&owner, name, body.description, goal)
        .await?;
    tracing::info!(habit_id = %habit.id, "Habit created");
    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<UpdateHabitRequest>,
) -> AppResult<Json<Habit>> {
    // Validate every provided field before touching the store.
    let name = match body.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Habit name is required".into()));
            }
            Some(name)
        }
        None => None,
    };
    if matches!(body.goal, Some(goal) if goal <= 0) {
        return Err(AppError::Validation("Goal must be a positive number".into()));
    }

    let patch = HabitPatch {
        name,
        description: body.description,
        goal: body.goal,
    };
    let habit = state.store.update_habit(&owner, habit_id, patch).await?;
    Ok(Json(habit))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.delete_habit(&owner, habit_id).await?;
    tracing::info!(habit_id = %habit_id, "Habit and its log entries deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// The tracker grid: a calendar window plus each habit aggregated against
/// it. Recomputed from a fresh store snapshot on every call.
pub async fn get_habit_logs(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Query(query): Query<LogsQuery>,
) -> AppResult<Json<HabitLogsResponse>> {
    let period = Period::parse_lenient(query.period.as_deref().unwrap_or("week"));
    let anchor = match query.anchor_date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| AppError::Validation(format!("Malformed anchor_date: {raw}")))?,
        None => Utc::now().date_naive(),
    };

    let window = CalendarWindow::build(period, anchor);
    let habits = state.store.list_habits(&owner).await?;
    let rows = aggregate(state.store.as_ref(), &owner, &habits, &window).await?;

    Ok(Json(HabitLogsResponse {
        period: window.period,
        label: window.label,
        dates: window.dates,
        habits: rows,
    }))
}

pub async fn toggle_habit_log(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Json(body): Json<ToggleRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let completed = state.store.toggle(&owner, body.habit_id, body.date).await?;
    let message = if completed {
        "Habit checked"
    } else {
        "Habit unchecked"
    };
    Ok(Json(serde_json::json!({
        "completed": completed,
        "message": message,
    })))
}
