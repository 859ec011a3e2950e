pub mod attendance;
pub mod auth;
pub mod health;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/registrar", post(auth::register))
        .route("/login", post(auth::login))
        .route("/asistencia", post(attendance::submit_attendance))
        .route("/historial/:usuario_id", get(attendance::user_history))
        .route("/historial-completo", get(attendance::full_history))
        .route("/usuarios", get(users::list_users))
        .with_state(state)
}
