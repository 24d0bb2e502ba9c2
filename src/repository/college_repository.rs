use crate::config::database::{Database, DatabaseTrait};
use crate::entity::college::College;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CollegeRepository {
    db_conn: Arc<Database>,
}

/// College fields for first-time creation during admin registration.
/// Domain must already be lowercased.
pub struct NewCollege {
    pub name: String,
    pub domain: String,
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

const COLLEGE_COLUMNS: &str =
    "id, name, domain, website_url, contact_email, contact_phone, address";

#[async_trait]
pub trait CollegeRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find_by_domain(&self, domain: &str) -> Option<College>;
    async fn find(&self, id: Uuid) -> Result<Option<College>, Error>;
    async fn insert(&self, new_college: NewCollege) -> Result<College, Error>;
}

#[async_trait]
impl CollegeRepositoryTrait for CollegeRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find_by_domain(&self, domain: &str) -> Option<College> {
        sqlx::query_as::<_, College>(&format!(
            "SELECT {} FROM colleges WHERE domain = $1",
            COLLEGE_COLUMNS
        ))
        .bind(domain)
        .fetch_optional(self.db_conn.get_pool())
        .await
        .ok()
        .flatten()
    }

    async fn find(&self, id: Uuid) -> Result<Option<College>, Error> {
        sqlx::query_as::<_, College>(&format!(
            "SELECT {} FROM colleges WHERE id = $1",
            COLLEGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn insert(&self, new_college: NewCollege) -> Result<College, Error> {
        sqlx::query_as::<_, College>(&format!(
            "INSERT INTO colleges (id, name, domain, website_url, contact_email, contact_phone, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLLEGE_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&new_college.name)
        .bind(&new_college.domain)
        .bind(&new_college.website_url)
        .bind(&new_college.contact_email)
        .bind(&new_college.contact_phone)
        .bind(&new_college.address)
        .fetch_one(self.db_conn.get_pool())
        .await
    }
}
