use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::mood::{Mood, MoodEntry, UpsertMoodRequest};
use crate::scope::OwnerScope;
use crate::services::moods::{aggregate_moods, MoodSummary};
use crate::AppState;

pub async fn list_moods(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let moods = state.store.list_moods(&owner).await?;
    Ok(Json(moods))
}

/// Logs the mood for a date; a second write for the same date replaces the
/// first.
pub async fn upsert_mood(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Json(body): Json<UpsertMoodRequest>,
) -> AppResult<Json<MoodEntry>> {
    let mood = Mood::parse(&body.mood).ok_or_else(|| {
        AppError::Validation(format!(
            "Unrecognized mood '{}' (expected happy, neutral or sad)",
            body.mood
        ))
    })?;

    let entry = state
        .store
        .upsert_mood(&owner, body.date, mood, body.note)
        .await?;
    Ok(Json(entry))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
    Path(mood_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.delete_mood(&owner, mood_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Trend, distribution and most-frequent mood over the full entry history.
pub async fn get_mood_summary(
    State(state): State<AppState>,
    OwnerScope(owner): OwnerScope,
) -> AppResult<Json<MoodSummary>> {
    let moods = state.store.list_moods(&owner).await?;
    Ok(Json(aggregate_moods(&moods)))
}
