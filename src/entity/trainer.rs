use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Trainer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub teacher_id: String,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub college_id: Option<Uuid>,
}
