use axum::{extract::State, Json};

use crate::models::user::UserSummary;
use crate::{error::Result, AppState};

/// Everyone except the director, for attendance rosters.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>> {
    let users = state.user_service.roster().await?;
    Ok(Json(users))
}
