use crate::dto::recommendation_dto::BatchRecommendationDto;
use crate::error::api_error::ApiError;
use crate::state::student_state::StudentState;
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

/// Ranked, explained batch recommendations for one student.
pub async fn recommend_batches(
    State(state): State<StudentState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<BatchRecommendationDto>>, ApiError> {
    let recommendations = state.recommendation_service.recommend(student_id).await?;
    Ok(Json(recommendations))
}
