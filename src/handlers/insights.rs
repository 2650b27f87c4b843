use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::scope::OwnerScope;
use crate::services::insights::{raw_insight_data, weekly_insight, DailyInsight, WeeklyInsight};
use crate::AppState;

pub async fn get_weekly_insight(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
) -> AppResult<Json<WeeklyInsight>> {
    let today = Utc::now().date_naive();
    let moods = state.store.list_moods(&owner).await?;
    let habits = state.store.list_habits(&owner).await?;
    Ok(Json(weekly_insight(&moods, &habits, today)))
}

pub async fn get_raw_insight_data(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
) -> AppResult<Json<Vec<DailyInsight>>> {
    let today = Utc::now().date_naive();
    let days = raw_insight_data(state.store.as_ref(), &owner, today).await?;
    Ok(Json(days))
}
