use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::error::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage service error: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Multipart(err) => err.status(),
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream(_) | Error::Reqwest(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match self {
            Error::BadRequest(msg) | Error::Unauthorized(msg) | Error::NotFound(msg) => msg,
            Error::Validation(err) => err.to_string(),
            Error::Multipart(err) => err.body_text(),
            Error::Upstream(detail) => {
                tracing::error!(error = %detail, "Storage service request failed");
                "Storage service unavailable".to_string()
            }
            Error::Reqwest(err) => {
                tracing::error!(error = %err, "Storage service request failed");
                "Storage service unavailable".to_string()
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return Error::NotFound("Resource not found".to_string());
        }
        if let Some(db_err) = err.as_database_error() {
            if let ErrorKind::ForeignKeyViolation = db_err.kind() {
                return Error::BadRequest("Referenced record does not exist".to_string());
            }
        }
        Error::Database(err)
    }
}
