use crate::config::logging::secure_log;
use crate::dto::auth_dto::LogoutResponseDto;
use crate::error::api_error::ApiError;
use crate::error::token_error::TokenError;
use crate::handler::auth_handler::session_response;
use crate::state::auth_state::AuthState;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{extract::State, http, Json};

/// Exchanges the refresh cookie for a rotated token pair. The previous
/// refresh token is invalid from this point on.
pub async fn refresh_token(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token_value = extract_refresh_cookie(&state, &headers).ok_or_else(|| {
        secure_log::secure_error!("Refresh attempt without refresh cookie");
        TokenError::MissingRefreshToken
    })?;

    let session = state.auth_service.refresh(&refresh_token_value).await?;
    Ok(session_response(&state.cookie_service, session))
}

/// Deletes the ledger entry for the cookie's owner and clears both cookies.
/// Logging out with an already-removed token is not an error.
pub async fn logout(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(refresh_token_value) = extract_refresh_cookie(&state, &headers) {
        state.auth_service.logout(&refresh_token_value).await?;
    }

    let response = (
        AppendHeaders([
            (SET_COOKIE, state.cookie_service.clear_access_cookie()),
            (SET_COOKIE, state.cookie_service.clear_refresh_cookie()),
        ]),
        Json(LogoutResponseDto {
            message: "Logged out successfully".to_string(),
        }),
    );
    Ok(response)
}

fn extract_refresh_cookie(state: &AuthState, headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    state.cookie_service.extract_refresh_token(cookie_header)
}
