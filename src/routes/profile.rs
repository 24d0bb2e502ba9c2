use crate::handler::profile_handler;
use crate::state::auth_state::AuthState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AuthState> {
    Router::<AuthState>::new().route("/auth/me", get(profile_handler::me))
}
