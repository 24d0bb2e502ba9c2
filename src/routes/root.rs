use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::handler::health_handler;
use crate::middleware::auth as auth_middleware;
use crate::routes::{auth, profile, student};
use crate::service::login_attempt_service::AttemptStore;
use crate::state::auth_state::AuthState;
use crate::state::student_state::StudentState;
use crate::state::token_state::TokenState;
use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn routes(
    db_conn: Arc<Database>,
    attempt_store: Arc<dyn AttemptStore>,
) -> Result<Router, TokenError> {
    let merged_router = {
        let auth_state = AuthState::new(&db_conn, attempt_store)?;
        let token_state = TokenState::new(&db_conn)?;
        let student_state = StudentState::new(&db_conn);

        auth::routes()
            .with_state(auth_state.clone())
            .merge(
                profile::routes()
                    .with_state(auth_state)
                    .layer(ServiceBuilder::new().layer(middleware::from_fn_with_state(
                        token_state,
                        auth_middleware::auth,
                    ))),
            )
            .merge(student::routes().with_state(student_state))
            .merge(Router::new().route("/health", get(health_handler::health_check)))
    };

    let app_router = Router::new()
        .nest("/api/v1", merged_router)
        .layer(TraceLayer::new_for_http());

    Ok(app_router)
}
