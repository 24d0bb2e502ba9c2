use crate::dto::auth_dto::{
    AdminRegisterDto, RegisterDto, StudentRegisterDto, TrainerRegisterDto,
};
use crate::error::api_error::ApiError;
use crate::error::request_error::ValidatedRequest;
use crate::handler::auth_handler::session_response;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::info;

pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RegisterDto>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Registration attempt with role: {}", payload.role);

    let session = state.auth_service.register(payload).await?;
    Ok(session_response(&state.cookie_service, session))
}

pub async fn register_admin(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<AdminRegisterDto>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Admin registration attempt for college domain: {}", payload.college_domain);

    let session = state.auth_service.register_admin(payload).await?;
    Ok(session_response(&state.cookie_service, session))
}

pub async fn register_student(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<StudentRegisterDto>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Student registration attempt");

    let session = state.auth_service.register_student(payload).await?;
    Ok(session_response(&state.cookie_service, session))
}

pub async fn register_trainer(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<TrainerRegisterDto>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Trainer registration attempt");

    let session = state.auth_service.register_trainer(payload).await?;
    Ok(session_response(&state.cookie_service, session))
}
