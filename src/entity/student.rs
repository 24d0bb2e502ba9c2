use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub register_number: String,
    pub year: Option<i32>,
    pub department: Option<String>,
    pub phone_number: Option<String>,
    pub college_id: Option<Uuid>,
}

/// Ordered skill-strength levels. Unrecognized stored values rank as
/// Beginner so they never earn a proficiency bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub fn parse(raw: &str) -> ProficiencyLevel {
        match raw.trim().to_uppercase().as_str() {
            "ADVANCED" => ProficiencyLevel::Advanced,
            "INTERMEDIATE" => ProficiencyLevel::Intermediate,
            _ => ProficiencyLevel::Beginner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(ProficiencyLevel::Beginner < ProficiencyLevel::Intermediate);
        assert!(ProficiencyLevel::Intermediate < ProficiencyLevel::Advanced);
    }

    #[test]
    fn unknown_levels_rank_as_beginner() {
        assert_eq!(ProficiencyLevel::parse("expert"), ProficiencyLevel::Beginner);
        assert_eq!(ProficiencyLevel::parse("intermediate"), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::parse(" ADVANCED "), ProficiencyLevel::Advanced);
    }
}
