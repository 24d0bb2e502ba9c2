use crate::config::database::{Database, DatabaseTrait};
use crate::entity::trainer::Trainer;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TrainerRepository {
    db_conn: Arc<Database>,
}

pub struct NewTrainer {
    pub name: String,
    pub email: String,
    pub teacher_id: String,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub college_id: Uuid,
}

const TRAINER_COLUMNS: &str =
    "id, name, email, teacher_id, department, specialization, phone_number, bio, college_id";

#[async_trait]
pub trait TrainerRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn email_exists(&self, email: &str) -> Result<bool, Error>;
    async fn teacher_id_exists(&self, teacher_id: &str) -> Result<bool, Error>;
    async fn insert(&self, new_trainer: NewTrainer) -> Result<Trainer, Error>;
}

#[async_trait]
impl TrainerRepositoryTrait for TrainerRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM trainers WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn teacher_id_exists(&self, teacher_id: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM trainers WHERE teacher_id = $1)",
        )
        .bind(teacher_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn insert(&self, new_trainer: NewTrainer) -> Result<Trainer, Error> {
        sqlx::query_as::<_, Trainer>(&format!(
            "INSERT INTO trainers (id, name, email, teacher_id, department, specialization, phone_number, bio, college_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            TRAINER_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&new_trainer.name)
        .bind(&new_trainer.email)
        .bind(&new_trainer.teacher_id)
        .bind(&new_trainer.department)
        .bind(&new_trainer.specialization)
        .bind(&new_trainer.phone_number)
        .bind(&new_trainer.bio)
        .bind(new_trainer.college_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }
}
