use crate::config::database::Database;
use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::entity::refresh_token::RefreshToken;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::token_error::TokenError;
use crate::repository::refresh_token_repository::{
    RefreshTokenRepository, RefreshTokenRepositoryTrait,
};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Generates a new opaque refresh token value: 32 cryptographically secure
/// random bytes, base64 encoded.
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);

    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Expiry for a token issued now, given the configured TTL.
pub fn expiration_from_now(ttl_days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(ttl_days)
}

#[derive(Clone)]
pub struct RefreshTokenService {
    refresh_token_repo: RefreshTokenRepository,
    refresh_token_ttl_days: i64,
}

impl RefreshTokenService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        let refresh_token_ttl_days = parameter::get_i64("REFRESH_TOKEN_TTL_DAYS");

        Self {
            refresh_token_repo: RefreshTokenRepository::new(db_conn),
            refresh_token_ttl_days,
        }
    }

    /// Issues a fresh token for the user. Any previously issued token for
    /// the same user stops existing in the same transaction, so at most one
    /// is live at any time.
    pub async fn create_refresh_token(&self, user_id: Uuid) -> Result<RefreshToken, ApiError> {
        let token = generate_token_value();
        let expires_at = expiration_from_now(self.refresh_token_ttl_days);

        match self
            .refresh_token_repo
            .replace_for_user(user_id, &token, expires_at)
            .await
        {
            Ok(stored) => {
                info!("Refresh token rotated for user ID: {}", user_id);
                Ok(stored)
            }
            Err(e) => {
                secure_log::secure_error!("Failed to store refresh token", e);
                Err(DbError::SomethingWentWrong("Refresh token persistence failed".to_string()))?
            }
        }
    }

    pub async fn find_by_token(&self, value: &str) -> Option<RefreshToken> {
        self.refresh_token_repo.find_by_token(value).await
    }

    /// Passes a live token through; an expired token is removed from the
    /// ledger and rejected, forcing re-authentication.
    pub async fn verify_expiration(&self, token: RefreshToken) -> Result<RefreshToken, ApiError> {
        if token.is_expired(Utc::now()) {
            if let Err(e) = self.refresh_token_repo.delete_by_token(&token.token).await {
                secure_log::secure_error!("Failed to delete expired refresh token", e);
            }
            return Err(TokenError::RefreshTokenExpired)?;
        }
        Ok(token)
    }

    pub async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), ApiError> {
        self.refresh_token_repo
            .delete_by_user_id(user_id)
            .await
            .map_err(|e| {
                secure_log::secure_error!("Failed to delete refresh token for user", e);
                ApiError::Db(DbError::SomethingWentWrong(
                    "Refresh token deletion failed".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_opaque() {
        let token1 = generate_token_value();
        let token2 = generate_token_value();

        assert_ne!(token1, token2);

        // 32 bytes of base64 with padding.
        assert_eq!(token1.len(), 44);
        assert_eq!(token2.len(), 44);
    }

    #[test]
    fn expiration_is_ttl_days_ahead() {
        let expires_at = expiration_from_now(7);
        let expected = Utc::now() + Duration::days(7);
        assert!((expires_at - expected).num_seconds().abs() < 10);
    }

    #[test]
    fn expiry_classification() {
        let now = Utc::now();
        let live = RefreshToken {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            token: generate_token_value(),
            expires_at: now + Duration::days(1),
        };
        let stale = RefreshToken {
            expires_at: now - Duration::seconds(1),
            ..live.clone()
        };

        assert!(!live.is_expired(now));
        assert!(stale.is_expired(now));
    }
}
