pub(crate) mod admin_repository;
pub(crate) mod batch_repository;
pub(crate) mod college_repository;
pub(crate) mod refresh_token_repository;
pub(crate) mod student_repository;
pub(crate) mod trainer_repository;
pub(crate) mod user_repository;
