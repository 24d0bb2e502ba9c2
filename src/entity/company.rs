use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hiring partner. Relevance to a student is derived from the domain tag at
/// recommendation time, never stored. hiring_type is presence-checked only.
#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub hiring_type: Option<String>,
}
