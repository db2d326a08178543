use crate::dtos::{BusinessProfileResponse, ExistsResponse, ProfileResponse, UpsertProfileRequest};
use crate::middleware::OwnerId;
use crate::startup::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use service_core::error::AppError;
use validator::Validate;

pub async fn get_profile(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .db
        .get_business_profile(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Profile not found")))?;

    Ok(Json(ProfileResponse {
        profile: BusinessProfileResponse::from(profile),
    }))
}

pub async fn upsert_profile(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = state
        .db
        .upsert_business_profile(owner_id, &payload.into_upsert())
        .await?;

    Ok(Json(ProfileResponse {
        profile: BusinessProfileResponse::from(profile),
    }))
}

/// Cheap existence probe so composition screens can prompt for a profile
/// before offering PDF export.
pub async fn profile_exists(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<impl IntoResponse, AppError> {
    let exists = state.db.business_profile_exists(owner_id).await?;
    Ok(Json(ExistsResponse { exists }))
}
