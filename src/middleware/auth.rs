use crate::config::logging::secure_log;
use crate::error::api_error::ApiError;
use crate::error::auth_error::AuthError;
use crate::error::token_error::TokenError;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::auth_service::normalize_email;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::{http, http::Request, middleware::Next, response::IntoResponse};
use tracing::info;

/// Authenticates the request from either an Authorization bearer header or
/// the access-token cookie, then injects the account as an extension.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let bearer = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    let token = match bearer {
        Some(token) => token,
        None => {
            let cookie_header = req
                .headers()
                .get(http::header::COOKIE)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("");
            state
                .cookie_service
                .extract_access_token(cookie_header)
                .ok_or_else(|| {
                    secure_log::secure_error!("Request without access token rejected");
                    TokenError::MissingToken
                })?
        }
    };

    let claims = state.token_service.verify(&token)?;

    let user = state
        .user_repo
        .find_by_email(&normalize_email(&claims.sub))
        .await
        .ok_or_else(|| {
            secure_log::secure_error!("Token subject has no account record");
            AuthError::NotFound("User".to_string())
        })?;

    info!("Authenticated request for user ID: {}", user.id);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
