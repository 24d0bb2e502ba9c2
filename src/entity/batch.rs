use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_weeks: Option<i32>,
    pub status: String,
    pub syllabus_id: Option<Uuid>,
}

/// Lifecycle of a batch. Which statuses are eligible for recommendation is
/// configuration (RECOMMENDATION_ELIGIBLE_STATUSES), not a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStatus {
    Upcoming,
    Active,
    Completed,
}

impl BatchStatus {
    pub fn parse(raw: &str) -> Option<BatchStatus> {
        match raw.trim().to_uppercase().as_str() {
            "UPCOMING" => Some(BatchStatus::Upcoming),
            "ACTIVE" => Some(BatchStatus::Active),
            "COMPLETED" => Some(BatchStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Upcoming => "UPCOMING",
            BatchStatus::Active => "ACTIVE",
            BatchStatus::Completed => "COMPLETED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [BatchStatus::Upcoming, BatchStatus::Active, BatchStatus::Completed] {
            assert_eq!(BatchStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BatchStatus::parse("archived"), None);
    }
}
