use crate::config::database::Database;
use crate::config::parameter;
use crate::dto::recommendation_dto::BatchRecommendationDto;
use crate::entity::batch::BatchStatus;
use crate::entity::student::ProficiencyLevel;
use crate::error::api_error::ApiError;
use crate::error::auth_error::AuthError;
use crate::error::db_error::DbError;
use crate::repository::batch_repository::{BatchRepository, BatchRepositoryTrait};
use crate::repository::student_repository::{StudentRepository, StudentRepositoryTrait};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const SKILL_MATCH_POINTS: i32 = 2;
const NEW_TOPIC_POINTS: i32 = 3;
const RELEVANT_COMPANY_POINTS: i32 = 5;
const HIRING_COMPANY_BONUS: i32 = 2;

const TRAINER_PLACEHOLDER: &str = "Not assigned yet";
const START_DATE_PLACEHOLDER: &str = "To be announced";

/// One student skill with its proficiency.
#[derive(Clone, Debug)]
pub struct RatedSkill {
    pub name: String,
    pub level: ProficiencyLevel,
}

/// Everything the scoring pass needs to know about the student: rated
/// skills plus every syllabus-topic name from batches already attended.
#[derive(Clone, Debug, Default)]
pub struct StudentSnapshot {
    pub skills: Vec<RatedSkill>,
    pub history_topics: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct TopicSnapshot {
    pub name: String,
    pub technologies: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CompanySnapshot {
    pub domain: Option<String>,
    pub hiring_type: Option<String>,
}

/// A candidate batch with its syllabus topics, mapped companies, and (first)
/// trainer, loaded once per scoring pass.
#[derive(Clone, Debug)]
pub struct BatchCandidate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_weeks: Option<i32>,
    pub topics: Vec<TopicSnapshot>,
    pub companies: Vec<CompanySnapshot>,
    pub trainer_name: Option<String>,
}

/// Technology tokens of a batch: every topic name plus each entry of the
/// topic's comma-separated technologies field, trimmed and lowercased.
fn technology_tokens(topics: &[TopicSnapshot]) -> HashSet<String> {
    let mut technologies = HashSet::new();

    for topic in topics {
        technologies.insert(topic.name.to_lowercase());
        if let Some(raw) = &topic.technologies {
            for entry in raw.split(',') {
                let entry = entry.trim();
                if !entry.is_empty() {
                    technologies.insert(entry.to_lowercase());
                }
            }
        }
    }

    technologies
}

/// Topics the student already knows: skill names plus every topic name seen
/// in previously attended batches.
fn known_topics(student: &StudentSnapshot) -> HashSet<String> {
    let mut known = HashSet::new();

    for skill in &student.skills {
        known.insert(skill.name.to_lowercase());
    }
    for topic in &student.history_topics {
        known.insert(topic.to_lowercase());
    }

    known
}

/// Scores one candidate batch for the student. Returns None when nothing
/// matches at all; zero-score batches never appear in results.
pub fn score_batch(
    student: &StudentSnapshot,
    batch: &BatchCandidate,
) -> Option<BatchRecommendationDto> {
    let mut match_reasons = Vec::new();

    // 1. Skill match: base points per matching skill, plus a proficiency
    //    bonus for intermediate/advanced ratings.
    let technologies = technology_tokens(&batch.topics);
    let mut skill_match_score = 0;
    let mut matched_skills = 0;

    for skill in &student.skills {
        if technologies.contains(&skill.name.to_lowercase()) {
            matched_skills += 1;
            skill_match_score += match skill.level {
                ProficiencyLevel::Beginner => 0,
                ProficiencyLevel::Intermediate => 1,
                ProficiencyLevel::Advanced => 2,
            };
        }
    }
    skill_match_score += matched_skills * SKILL_MATCH_POINTS;

    if matched_skills > 0 {
        match_reasons.push(format!(
            "{} of your skills match this batch's technologies",
            matched_skills
        ));
    }

    // 2. Syllabus overlap: the score rewards topics the student has NOT
    //    seen yet - the learning opportunity, not the redundancy.
    let known = known_topics(student);
    let new_topics: Vec<&str> = batch
        .topics
        .iter()
        .filter(|topic| !known.contains(&topic.name.to_lowercase()))
        .map(|topic| topic.name.as_str())
        .collect();

    let syllabus_overlap_score = new_topics.len() as i32 * NEW_TOPIC_POINTS;

    if !new_topics.is_empty() {
        let examples = new_topics
            .iter()
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        match_reasons.push(format!(
            "You'll learn {} new topics including {}",
            new_topics.len(),
            examples
        ));
    }

    // 3. Company relevance: a mapped company whose domain tag mentions one
    //    of the student's skills, with a bonus when it is hiring.
    let mut company_relevance_score = 0;
    let mut relevant_companies = 0;

    for company in &batch.companies {
        let Some(domain) = &company.domain else {
            continue;
        };
        let domain_lower = domain.to_lowercase();
        let domain_match = student
            .skills
            .iter()
            .any(|skill| domain_lower.contains(&skill.name.to_lowercase()));

        if domain_match {
            relevant_companies += 1;
            if company.hiring_type.is_some() {
                company_relevance_score += HIRING_COMPANY_BONUS;
            }
        }
    }
    company_relevance_score += relevant_companies * RELEVANT_COMPANY_POINTS;

    if relevant_companies > 0 {
        match_reasons.push(format!(
            "{} companies aligned with your skills are associated with this batch",
            relevant_companies
        ));

        let hiring_companies = batch
            .companies
            .iter()
            .filter(|company| company.hiring_type.is_some())
            .count();
        if hiring_companies > 0 {
            match_reasons.push(format!(
                "{} companies are currently hiring for similar roles",
                hiring_companies
            ));
        }
    }

    let total_score = skill_match_score + syllabus_overlap_score + company_relevance_score;
    if total_score == 0 {
        return None;
    }

    Some(BatchRecommendationDto {
        batch_id: batch.id,
        batch_name: batch.name.clone(),
        description: batch.description.clone(),
        duration_weeks: batch.duration_weeks,
        total_score,
        skill_match_score,
        syllabus_overlap_score,
        company_relevance_score,
        match_reasons,
        trainer_name: batch
            .trainer_name
            .clone()
            .unwrap_or_else(|| TRAINER_PLACEHOLDER.to_string()),
        start_date: START_DATE_PLACEHOLDER.to_string(),
    })
}

/// Scores all candidates, drops non-matches, sorts descending by total
/// score (stable: ties keep input order) and truncates to the cap.
pub fn rank_batches(
    student: &StudentSnapshot,
    batches: &[BatchCandidate],
    limit: usize,
) -> Vec<BatchRecommendationDto> {
    let mut recommendations: Vec<BatchRecommendationDto> = batches
        .iter()
        .filter_map(|batch| score_batch(student, batch))
        .collect();

    recommendations.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    recommendations.truncate(limit);
    recommendations
}

#[derive(Clone)]
pub struct RecommendationService {
    student_repo: StudentRepository,
    batch_repo: BatchRepository,
}

impl RecommendationService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            student_repo: StudentRepository::new(db_conn),
            batch_repo: BatchRepository::new(db_conn),
        }
    }

    pub async fn recommend(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<BatchRecommendationDto>, ApiError> {
        let student = self
            .student_repo
            .find(student_id)
            .await
            .map_err(|e| storage_failure("Student lookup failed", e))?
            .ok_or_else(|| ApiError::Auth(AuthError::NotFound("Student".to_string())))?;

        let snapshot = self.load_student_snapshot(student.id).await?;
        let candidates = self.load_candidates().await?;
        let limit = parameter::get_u64("RECOMMENDATION_LIMIT") as usize;

        let recommendations = rank_batches(&snapshot, &candidates, limit);
        info!(
            "Scored {} candidate batches for student ID: {}, recommending {}",
            candidates.len(),
            student.id,
            recommendations.len()
        );

        Ok(recommendations)
    }

    async fn load_student_snapshot(&self, student_id: Uuid) -> Result<StudentSnapshot, ApiError> {
        let skills = self
            .student_repo
            .load_rated_skills(student_id)
            .await
            .map_err(|e| storage_failure("Skill lookup failed", e))?
            .into_iter()
            .map(|row| RatedSkill {
                level: ProficiencyLevel::parse(&row.level),
                name: row.name,
            })
            .collect();

        let history_topics = self
            .student_repo
            .load_history_topics(student_id)
            .await
            .map_err(|e| storage_failure("Batch history lookup failed", e))?;

        Ok(StudentSnapshot {
            skills,
            history_topics,
        })
    }

    async fn load_candidates(&self) -> Result<Vec<BatchCandidate>, ApiError> {
        let statuses = eligible_statuses();

        let batches = self
            .batch_repo
            .find_by_status_in(&statuses)
            .await
            .map_err(|e| storage_failure("Batch lookup failed", e))?;

        let mut candidates = Vec::with_capacity(batches.len());
        for batch in batches {
            let topics = match batch.syllabus_id {
                Some(syllabus_id) => self
                    .batch_repo
                    .topics_for_syllabus(syllabus_id)
                    .await
                    .map_err(|e| storage_failure("Syllabus lookup failed", e))?
                    .into_iter()
                    .map(|row| TopicSnapshot {
                        name: row.name,
                        technologies: row.technologies,
                    })
                    .collect(),
                // A batch without a syllabus still competes on company
                // relevance alone.
                None => Vec::new(),
            };

            let companies = self
                .batch_repo
                .companies_for_batch(batch.id)
                .await
                .map_err(|e| storage_failure("Company lookup failed", e))?
                .into_iter()
                .map(|company| CompanySnapshot {
                    domain: company.domain,
                    hiring_type: company.hiring_type,
                })
                .collect();

            let trainer_name = self
                .batch_repo
                .first_trainer_name(batch.id)
                .await
                .map_err(|e| storage_failure("Trainer lookup failed", e))?;

            candidates.push(BatchCandidate {
                id: batch.id,
                name: batch.name,
                description: batch.description,
                duration_weeks: batch.duration_weeks,
                topics,
                companies,
                trainer_name,
            });
        }

        Ok(candidates)
    }
}

/// The configured set of batch statuses eligible for recommendation.
/// Unknown names are skipped with a warning; an empty result falls back to
/// ACTIVE so a bad config value cannot silently disable the feature.
fn eligible_statuses() -> Vec<String> {
    let raw = parameter::get("RECOMMENDATION_ELIGIBLE_STATUSES");

    let mut statuses: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        match BatchStatus::parse(entry) {
            Some(status) => {
                let value = status.as_str().to_string();
                if !statuses.contains(&value) {
                    statuses.push(value);
                }
            }
            None if entry.trim().is_empty() => {}
            None => warn!("Ignoring unknown batch status in configuration: {}", entry.trim()),
        }
    }

    if statuses.is_empty() {
        statuses.push(BatchStatus::Active.as_str().to_string());
    }
    statuses
}

fn storage_failure(context: &str, error: sqlx::Error) -> ApiError {
    crate::config::logging::secure_log::secure_error!(context, error);
    ApiError::Db(DbError::SomethingWentWrong(context.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, level: ProficiencyLevel) -> RatedSkill {
        RatedSkill {
            name: name.to_string(),
            level,
        }
    }

    fn topic(name: &str, technologies: Option<&str>) -> TopicSnapshot {
        TopicSnapshot {
            name: name.to_string(),
            technologies: technologies.map(str::to_string),
        }
    }

    fn candidate(name: &str, topics: Vec<TopicSnapshot>) -> BatchCandidate {
        BatchCandidate {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: None,
            duration_weeks: Some(8),
            topics,
            companies: Vec::new(),
            trainer_name: None,
        }
    }

    #[test]
    fn scenario_intermediate_java_student() {
        // Skill {Java, INTERMEDIATE}; topics Java (known) and Spring (new);
        // no companies. Expected: 2 + 1 skill points, 3 for one new topic.
        let student = StudentSnapshot {
            skills: vec![skill("Java", ProficiencyLevel::Intermediate)],
            history_topics: Vec::new(),
        };
        let batch = candidate(
            "Full Stack",
            vec![topic("Java", Some("java, spring")), topic("Spring", None)],
        );

        let scored = score_batch(&student, &batch).unwrap();
        assert_eq!(scored.skill_match_score, 3);
        assert_eq!(scored.syllabus_overlap_score, 3);
        assert_eq!(scored.company_relevance_score, 0);
        assert_eq!(scored.total_score, 6);
        assert!(scored
            .match_reasons
            .iter()
            .any(|reason| reason.contains("1 of your skills match")));
        assert_eq!(scored.trainer_name, "Not assigned yet");
        assert_eq!(scored.start_date, "To be announced");
    }

    #[test]
    fn advanced_proficiency_earns_larger_bonus() {
        let student = StudentSnapshot {
            skills: vec![skill("Rust", ProficiencyLevel::Advanced)],
            history_topics: vec!["Rust".to_string()],
        };
        let batch = candidate("Systems", vec![topic("Rust", None)]);

        let scored = score_batch(&student, &batch).unwrap();
        // 2 base + 2 advanced; topic already known so no overlap points.
        assert_eq!(scored.skill_match_score, 4);
        assert_eq!(scored.syllabus_overlap_score, 0);
        assert_eq!(scored.total_score, 4);
    }

    #[test]
    fn zero_score_batches_are_excluded() {
        let student = StudentSnapshot {
            skills: vec![skill("Python", ProficiencyLevel::Beginner)],
            history_topics: vec!["machine learning".to_string()],
        };
        // Batch whose single topic is already known and matches nothing.
        let batch = candidate("ML", vec![topic("Machine Learning", None)]);

        assert!(score_batch(&student, &batch).is_none());
    }

    #[test]
    fn student_with_no_skills_and_no_history_gets_empty_list() {
        let student = StudentSnapshot::default();
        let mut batch = candidate("Anything", Vec::new());
        batch.companies = vec![CompanySnapshot {
            domain: Some("fintech".to_string()),
            hiring_type: Some("FULL_TIME".to_string()),
        }];

        // No skills: no technology match, no company relevance, no topics.
        assert_eq!(rank_batches(&student, &[batch], 5).len(), 0);
    }

    #[test]
    fn syllabus_free_batch_scores_through_companies() {
        let student = StudentSnapshot {
            skills: vec![skill("Java", ProficiencyLevel::Beginner)],
            history_topics: Vec::new(),
        };
        let mut batch = candidate("Placement Drive", Vec::new());
        batch.companies = vec![
            CompanySnapshot {
                domain: Some("Java consulting".to_string()),
                hiring_type: Some("FULL_TIME".to_string()),
            },
            CompanySnapshot {
                domain: None,
                hiring_type: Some("INTERNSHIP".to_string()),
            },
        ];

        let scored = score_batch(&student, &batch).unwrap();
        // One relevant company (5) with hiring type (+2).
        assert_eq!(scored.company_relevance_score, 7);
        assert_eq!(scored.total_score, 7);
        assert!(scored
            .match_reasons
            .iter()
            .any(|reason| reason.contains("1 companies aligned with your skills")));
        // Hiring count spans all mapped companies with a hiring type.
        assert!(scored
            .match_reasons
            .iter()
            .any(|reason| reason.contains("2 companies are currently hiring")));
    }

    #[test]
    fn results_are_capped_and_sorted_descending() {
        let student = StudentSnapshot {
            skills: vec![skill("Java", ProficiencyLevel::Beginner)],
            history_topics: Vec::new(),
        };

        // Ten batches, each scoring; batch k carries k new topics.
        let batches: Vec<BatchCandidate> = (1..=10)
            .map(|k| {
                let topics = (0..k)
                    .map(|i| topic(&format!("Topic {}-{}", k, i), Some("java")))
                    .collect();
                candidate(&format!("Batch {}", k), topics)
            })
            .collect();

        let ranked = rank_batches(&student, &batches, 5);
        assert_eq!(ranked.len(), 5);
        for window in ranked.windows(2) {
            assert!(window[0].total_score >= window[1].total_score);
        }
        assert_eq!(ranked[0].batch_name, "Batch 10");
    }

    #[test]
    fn ranking_is_deterministic() {
        let student = StudentSnapshot {
            skills: vec![
                skill("Java", ProficiencyLevel::Intermediate),
                skill("SQL", ProficiencyLevel::Beginner),
            ],
            history_topics: vec!["Git".to_string()],
        };
        let batches = vec![
            candidate("A", vec![topic("Java", Some("java, sql")), topic("Docker", None)]),
            candidate("B", vec![topic("Kubernetes", Some("helm"))]),
            candidate("C", vec![topic("SQL", Some("postgres, sql"))]),
        ];

        let first = rank_batches(&student, &batches, 5);
        let second = rank_batches(&student, &batches, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let student = StudentSnapshot {
            skills: vec![skill("Go", ProficiencyLevel::Beginner)],
            history_topics: Vec::new(),
        };
        // Identical scoring shape: one new topic each, same technologies.
        let batches = vec![
            candidate("First", vec![topic("Channels", Some("go"))]),
            candidate("Second", vec![topic("Goroutines", Some("go"))]),
        ];

        let ranked = rank_batches(&student, &batches, 5);
        assert_eq!(ranked[0].batch_name, "First");
        assert_eq!(ranked[1].batch_name, "Second");
    }

    #[test]
    fn new_topic_reason_names_at_most_two_examples() {
        let student = StudentSnapshot::default();
        let batch = candidate(
            "Broad",
            vec![
                topic("Alpha", Some("x")),
                topic("Beta", None),
                topic("Gamma", None),
            ],
        );
        // A skill is needed for any score; "x" matches via technologies.
        let student = StudentSnapshot {
            skills: vec![skill("x", ProficiencyLevel::Beginner)],
            ..student
        };

        let scored = score_batch(&student, &batch).unwrap();
        let reason = scored
            .match_reasons
            .iter()
            .find(|reason| reason.starts_with("You'll learn"))
            .unwrap();
        assert_eq!(reason, "You'll learn 3 new topics including Alpha, Beta");
    }

    #[test]
    fn technology_tokens_split_and_normalize() {
        let tokens = technology_tokens(&[topic("Web Basics", Some(" HTML , css,,JavaScript "))]);
        assert!(tokens.contains("web basics"));
        assert!(tokens.contains("html"));
        assert!(tokens.contains("css"));
        assert!(tokens.contains("javascript"));
        assert_eq!(tokens.len(), 4);
    }
}
