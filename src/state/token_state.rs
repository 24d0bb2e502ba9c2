use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use crate::service::cookie_service::CookieService;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;

/// State for the authentication middleware: verify the access token, find
/// the account it names.
#[derive(Clone)]
pub struct TokenState {
    pub token_service: TokenService,
    pub user_repo: UserRepository,
    pub cookie_service: CookieService,
}

impl TokenState {
    pub fn new(db_conn: &Arc<Database>) -> Result<Self, TokenError> {
        Ok(Self {
            token_service: TokenService::new()?,
            user_repo: UserRepository::new(db_conn),
            cookie_service: CookieService::from_parameters(),
        })
    }
}
