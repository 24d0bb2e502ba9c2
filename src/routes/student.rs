use crate::handler::recommendation_handler;
use crate::state::student_state::StudentState;
use axum::{routing::get, Router};

pub fn routes() -> Router<StudentState> {
    Router::<StudentState>::new().route(
        "/students/{id}/recommend-batches",
        get(recommendation_handler::recommend_batches),
    )
}
