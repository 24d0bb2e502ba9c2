use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::user::User;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db_conn: Arc<Database>,
}

/// Fields of a user row to be created. Email must already be normalized
/// (trimmed, lowercased) by the caller.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub college_id: Option<Uuid>,
}

#[async_trait]
pub trait UserRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn email_exists(&self, email: &str) -> Result<bool, Error>;
    async fn find(&self, id: Uuid) -> Result<User, Error>;
    async fn insert(&self, new_user: NewUser) -> Result<User, Error>;
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        match sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, college_id, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.db_conn.get_pool())
        .await
        {
            Ok(user) => user,
            Err(e) => {
                secure_log::secure_error!("User lookup by email failed", e);
                None
            }
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn find(&self, id: Uuid) -> Result<User, Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, college_id, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password, role, college_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, password, role, college_id, created_at, updated_at",
        )
        .bind(Uuid::now_v7())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.role)
        .bind(new_user.college_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }
}
