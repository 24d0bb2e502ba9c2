use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct College {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

/// Admin staff record. college_id is UNIQUE: one admin per college.
#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role_title: Option<String>,
    pub college_id: Option<Uuid>,
}
