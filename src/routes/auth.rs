use axum::{extract::State, Json};

use crate::dto::auth_dto::{LoginPayload, LoginResponse, RegisterUserPayload, RegisterUserResponse};
use crate::{error::Result, AppState};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<RegisterUserResponse>> {
    let response = state.user_service.register(payload).await?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    let response = state.user_service.login(payload).await?;
    Ok(Json(response))
}
