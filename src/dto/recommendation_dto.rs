use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ranked batch recommendation with its component scores and the
/// human-readable reasons behind them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchRecommendationDto {
    pub batch_id: Uuid,
    pub batch_name: String,
    pub description: Option<String>,
    pub duration_weeks: Option<i32>,
    pub total_score: i32,
    pub skill_match_score: i32,
    pub syllabus_overlap_score: i32,
    pub company_relevance_score: i32,
    pub match_reasons: Vec<String>,
    pub trainer_name: String,
    pub start_date: String,
}
