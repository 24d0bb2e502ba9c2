use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures of the authentication and registration flows. Unknown email and
/// wrong password both collapse into InvalidCredentials so responses cannot
/// be used to enumerate accounts.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Too many failed login attempts, try again later")]
    TooManyAttempts,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("{0} already in use")]
    DuplicateIdentifier(String),
    #[error("An admin already exists for this college")]
    ConflictingAdmin,
    #[error("{0} not found")]
    NotFound(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::DuplicateIdentifier(_) => StatusCode::CONFLICT,
            AuthError::ConflictingAdmin => StatusCode::CONFLICT,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        ErrorResponse::send(self.to_string()).with_status(status_code).into_response()
    }
}
