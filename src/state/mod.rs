pub(crate) mod auth_state;
pub(crate) mod student_state;
pub(crate) mod token_state;
