use crate::dto::auth_dto::AuthResponseDto;
use crate::entity::user::User;
use crate::error::api_error::ApiError;
use crate::state::auth_state::AuthState;
use axum::{extract::State, Extension, Json};

/// Profile of the authenticated caller. The middleware has already verified
/// the token; a missing credential record at this point is fatal for the
/// request.
pub async fn me(
    State(state): State<AuthState>,
    Extension(current_user): Extension<User>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let user = state
        .auth_service
        .get_current_user_profile(&current_user.email)
        .await?;

    Ok(Json(AuthResponseDto::profile_of(&user)))
}
