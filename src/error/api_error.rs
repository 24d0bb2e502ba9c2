use crate::error::auth_error::AuthError;
use crate::error::db_error::DbError;
use crate::error::token_error::TokenError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Unified handler error: every endpoint returns Result<_, ApiError> and the
/// wrapped domain error picks its own status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(error) => error.into_response(),
            ApiError::Token(error) => error.into_response(),
            ApiError::Db(error) => error.into_response(),
        }
    }
}
