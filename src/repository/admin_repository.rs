use crate::config::database::{Database, DatabaseTrait};
use crate::entity::college::Admin;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AdminRepository {
    db_conn: Arc<Database>,
}

pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role_title: Option<String>,
    pub college_id: Uuid,
}

#[async_trait]
pub trait AdminRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn exists_for_college(&self, college_id: Uuid) -> Result<bool, Error>;
    async fn insert(&self, new_admin: NewAdmin) -> Result<Admin, Error>;
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn exists_for_college(&self, college_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE college_id = $1)",
        )
        .bind(college_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn insert(&self, new_admin: NewAdmin) -> Result<Admin, Error> {
        sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (id, name, email, phone_number, role_title, college_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, phone_number, role_title, college_id",
        )
        .bind(Uuid::now_v7())
        .bind(&new_admin.name)
        .bind(&new_admin.email)
        .bind(&new_admin.phone_number)
        .bind(&new_admin.role_title)
        .bind(new_admin.college_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }
}
