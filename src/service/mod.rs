pub(crate) mod auth_service;
pub(crate) mod cookie_service;
pub(crate) mod login_attempt_service;
pub(crate) mod recommendation_service;
pub(crate) mod refresh_token_service;
pub(crate) mod token_service;
