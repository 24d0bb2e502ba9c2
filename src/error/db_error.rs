use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{0}")]
    SomethingWentWrong(String),
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        // Storage details never leave the process.
        ErrorResponse::send("Database error".to_string())
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response()
    }
}

/// True when the error is a storage-level uniqueness violation, the backstop
/// behind the application's exists-by pre-checks.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
