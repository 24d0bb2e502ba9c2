use crate::config::database::{Database, DatabaseTrait};
use crate::entity::student::Student;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct StudentRepository {
    db_conn: Arc<Database>,
}

pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub register_number: String,
    pub year: Option<i32>,
    pub department: Option<String>,
    pub phone_number: Option<String>,
    pub college_id: Uuid,
}

/// Skill name with its stored proficiency level, as rated for one student.
#[derive(Clone, sqlx::FromRow)]
pub struct RatedSkillRow {
    pub name: String,
    pub level: String,
}

const STUDENT_COLUMNS: &str =
    "id, name, email, register_number, year, department, phone_number, college_id";

#[async_trait]
pub trait StudentRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find(&self, id: Uuid) -> Result<Option<Student>, Error>;
    async fn email_exists(&self, email: &str) -> Result<bool, Error>;
    async fn register_number_exists(&self, register_number: &str) -> Result<bool, Error>;
    async fn insert(&self, new_student: NewStudent) -> Result<Student, Error>;
    /// All skills the student has rated, with levels.
    async fn load_rated_skills(&self, student_id: Uuid) -> Result<Vec<RatedSkillRow>, Error>;
    /// Topic names from the syllabi of every batch in the student's history.
    /// Batches without a syllabus contribute nothing.
    async fn load_history_topics(&self, student_id: Uuid) -> Result<Vec<String>, Error>;
}

#[async_trait]
impl StudentRepositoryTrait for StudentRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Option<Student>, Error> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn register_number_exists(&self, register_number: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE register_number = $1)",
        )
        .bind(register_number)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn insert(&self, new_student: NewStudent) -> Result<Student, Error> {
        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (id, name, email, register_number, year, department, phone_number, college_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            STUDENT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&new_student.name)
        .bind(&new_student.email)
        .bind(&new_student.register_number)
        .bind(new_student.year)
        .bind(&new_student.department)
        .bind(&new_student.phone_number)
        .bind(new_student.college_id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn load_rated_skills(&self, student_id: Uuid) -> Result<Vec<RatedSkillRow>, Error> {
        sqlx::query_as::<_, RatedSkillRow>(
            "SELECT s.name, s.level FROM student_skills ss \
             JOIN skills s ON s.id = ss.skill_id \
             WHERE ss.student_id = $1",
        )
        .bind(student_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn load_history_topics(&self, student_id: Uuid) -> Result<Vec<String>, Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT st.name FROM student_batch_history h \
             JOIN batches b ON b.id = h.batch_id \
             JOIN syllabus_topics st ON st.syllabus_id = b.syllabus_id \
             WHERE h.student_id = $1",
        )
        .bind(student_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }
}
