use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::refresh_token::RefreshToken;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct RefreshTokenRepository {
    db_conn: Arc<Database>,
}

#[async_trait]
pub trait RefreshTokenRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    /// Rotation primitive: atomically drops any existing token for the user
    /// and persists the new one. Concurrent rotations for the same user
    /// serialize on the row; last writer wins.
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, Error>;
    async fn find_by_token(&self, token: &str) -> Option<RefreshToken>;
    async fn delete_by_token(&self, token: &str) -> Result<(), Error>;
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
impl RefreshTokenRepositoryTrait for RefreshTokenRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, Error> {
        let mut tx = self.db_conn.get_pool().begin().await?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stored = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (id, user_id, token, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, token, expires_at",
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn find_by_token(&self, token: &str) -> Option<RefreshToken> {
        match sqlx::query_as::<_, RefreshToken>(
            "SELECT id, user_id, token, expires_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.db_conn.get_pool())
        .await
        {
            Ok(found) => found,
            Err(e) => {
                secure_log::secure_error!("Refresh token lookup failed", e);
                None
            }
        }
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(self.db_conn.get_pool())
            .await?;
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db_conn.get_pool())
            .await?;
        Ok(())
    }
}
