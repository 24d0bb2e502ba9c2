use crate::config::database::{Database, DatabaseTrait};
use crate::entity::batch::Batch;
use crate::entity::company::Company;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct BatchRepository {
    db_conn: Arc<Database>,
}

/// Syllabus topic projection used by the recommendation pass: the topic name
/// plus its free-text, comma-separated technologies field.
#[derive(Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub name: String,
    pub technologies: Option<String>,
}

#[async_trait]
pub trait BatchRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find_by_status_in(&self, statuses: &[String]) -> Result<Vec<Batch>, Error>;
    async fn topics_for_syllabus(&self, syllabus_id: Uuid) -> Result<Vec<TopicRow>, Error>;
    async fn companies_for_batch(&self, batch_id: Uuid) -> Result<Vec<Company>, Error>;
    async fn first_trainer_name(&self, batch_id: Uuid) -> Result<Option<String>, Error>;
}

#[async_trait]
impl BatchRepositoryTrait for BatchRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find_by_status_in(&self, statuses: &[String]) -> Result<Vec<Batch>, Error> {
        sqlx::query_as::<_, Batch>(
            "SELECT id, name, description, duration_weeks, status, syllabus_id \
             FROM batches WHERE status = ANY($1) ORDER BY id",
        )
        .bind(statuses)
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn topics_for_syllabus(&self, syllabus_id: Uuid) -> Result<Vec<TopicRow>, Error> {
        sqlx::query_as::<_, TopicRow>(
            "SELECT name, technologies FROM syllabus_topics WHERE syllabus_id = $1 ORDER BY id",
        )
        .bind(syllabus_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn companies_for_batch(&self, batch_id: Uuid) -> Result<Vec<Company>, Error> {
        sqlx::query_as::<_, Company>(
            "SELECT c.id, c.name, c.domain, c.hiring_type \
             FROM batch_company_mapping m \
             JOIN companies c ON c.id = m.company_id \
             WHERE m.batch_id = $1 ORDER BY m.id",
        )
        .bind(batch_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn first_trainer_name(&self, batch_id: Uuid) -> Result<Option<String>, Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT t.name FROM batch_trainers bt \
             JOIN trainers t ON t.id = bt.trainer_id \
             WHERE bt.batch_id = $1 ORDER BY bt.id LIMIT 1",
        )
        .bind(batch_id)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }
}
