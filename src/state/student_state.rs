use crate::config::database::Database;
use crate::service::recommendation_service::RecommendationService;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentState {
    pub recommendation_service: RecommendationService,
}

impl StudentState {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            recommendation_service: RecommendationService::new(db_conn),
        }
    }
}
