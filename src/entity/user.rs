use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub college_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account roles. Stored as text; immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Trainer,
    Student,
}

impl Role {
    /// Parses user-supplied role names, case-insensitively.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "TRAINER" => Some(Role::Trainer),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Trainer => "TRAINER",
            Role::Student => "STUDENT",
        }
    }

    /// The role claim carried in access tokens.
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" Trainer "), Some(Role::Trainer));
        assert_eq!(Role::parse("STUDENT"), Some(Role::Student));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn authority_prefix() {
        assert_eq!(Role::Admin.authority(), "ROLE_ADMIN");
        assert_eq!(Role::Student.authority(), "ROLE_STUDENT");
    }
}
