use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::service::auth_service::AuthService;
use crate::service::cookie_service::CookieService;
use crate::service::login_attempt_service::AttemptStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub(crate) auth_service: AuthService,
    pub(crate) cookie_service: CookieService,
}

impl AuthState {
    pub fn new(
        db_conn: &Arc<Database>,
        attempt_store: Arc<dyn AttemptStore>,
    ) -> Result<AuthState, TokenError> {
        Ok(Self {
            auth_service: AuthService::new(db_conn, attempt_store)?,
            cookie_service: CookieService::from_parameters(),
        })
    }
}
