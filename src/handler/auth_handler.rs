use crate::dto::auth_dto::{AuthResponseDto, LoginDto};
use crate::error::api_error::ApiError;
use crate::error::request_error::ValidatedRequest;
use crate::service::auth_service::AuthSession;
use crate::service::cookie_service::CookieService;
use crate::state::auth_state::AuthState;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{extract::State, Json};
use tracing::info;

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LoginDto>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt received");

    let session = state.auth_service.authenticate(payload).await?;
    Ok(session_response(&state.cookie_service, session))
}

/// Builds the common auth response: profile JSON body plus the token pair
/// attached as HTTP-only cookies. Tokens travel only via cookie, never in
/// the body.
pub(crate) fn session_response(
    cookies: &CookieService,
    session: AuthSession,
) -> impl IntoResponse {
    let access_cookie = cookies.access_cookie(&session.access.token);
    let refresh_cookie = cookies.refresh_cookie(&session.refresh_token);
    let body = AuthResponseDto::profile_of(&session.user);

    (
        AppendHeaders([(SET_COOKIE, access_cookie), (SET_COOKIE, refresh_cookie)]),
        Json(body),
    )
}
