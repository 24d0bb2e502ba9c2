use crate::handler::auth_handler;
use crate::handler::refresh_handler;
use crate::handler::register_handler;
use crate::state::auth_state::AuthState;
use axum::{routing::post, Router};

pub fn routes() -> Router<AuthState> {
    Router::<AuthState>::new()
        .route("/auth/login", post(auth_handler::login))
        .route("/auth/register", post(register_handler::register))
        .route("/auth/admin/register", post(register_handler::register_admin))
        .route("/auth/student/register", post(register_handler::register_student))
        .route("/auth/trainer/register", post(register_handler::register_trainer))
        .route("/auth/refresh", post(refresh_handler::refresh_token))
        .route("/auth/logout", post(refresh_handler::logout))
}
