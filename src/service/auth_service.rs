use crate::config::database::Database;
use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::dto::auth_dto::{
    AdminRegisterDto, LoginDto, RegisterDto, StudentRegisterDto, TrainerRegisterDto,
};
use crate::dto::token_dto::TokenReadDto;
use crate::entity::college::College;
use crate::entity::user::{Role, User};
use crate::error::api_error::ApiError;
use crate::error::auth_error::AuthError;
use crate::error::db_error::{is_unique_violation, DbError};
use crate::error::token_error::TokenError;
use crate::repository::admin_repository::{AdminRepository, AdminRepositoryTrait, NewAdmin};
use crate::repository::college_repository::{
    CollegeRepository, CollegeRepositoryTrait, NewCollege,
};
use crate::repository::student_repository::{
    NewStudent, StudentRepository, StudentRepositoryTrait,
};
use crate::repository::trainer_repository::{
    NewTrainer, TrainerRepository, TrainerRepositoryTrait,
};
use crate::repository::user_repository::{NewUser, UserRepository, UserRepositoryTrait};
use crate::service::login_attempt_service::AttemptStore;
use crate::service::refresh_token_service::RefreshTokenService;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use crate::validation::password;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything a successful login/registration/refresh produces: the profile
/// record plus a fresh access/refresh pair. Handlers decide how the tokens
/// travel (cookies).
pub struct AuthSession {
    pub user: User,
    pub access: TokenReadDto,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    college_repo: CollegeRepository,
    admin_repo: AdminRepository,
    student_repo: StudentRepository,
    trainer_repo: TrainerRepository,
    token_service: TokenService,
    refresh_token_service: RefreshTokenService,
    attempt_store: Arc<dyn AttemptStore>,
}

impl AuthService {
    pub fn new(
        db_conn: &Arc<Database>,
        attempt_store: Arc<dyn AttemptStore>,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            user_repo: UserRepository::new(db_conn),
            college_repo: CollegeRepository::new(db_conn),
            admin_repo: AdminRepository::new(db_conn),
            student_repo: StudentRepository::new(db_conn),
            trainer_repo: TrainerRepository::new(db_conn),
            token_service: TokenService::new()?,
            refresh_token_service: RefreshTokenService::new(db_conn),
            attempt_store,
        })
    }

    /// Credential login. Unknown email and wrong password are reported
    /// identically; only the server logs know which it was.
    pub async fn authenticate(&self, payload: LoginDto) -> Result<AuthSession, ApiError> {
        let email = normalize_email(&payload.email);

        if self.attempt_store.is_blocked(&email).await {
            warn!("Login blocked by attempt limiter");
            return Err(AuthError::TooManyAttempts)?;
        }

        let user = match self.user_repo.find_by_email(&email).await {
            Some(user) => user,
            None => {
                self.attempt_store.record_failure(&email).await;
                warn!("Login failed - email not registered");
                return Err(AuthError::InvalidCredentials)?;
            }
        };

        if !verify_password(&payload.password, &user) {
            self.attempt_store.record_failure(&email).await;
            warn!("Login failed - password mismatch for user ID: {}", user.id);
            return Err(AuthError::InvalidCredentials)?;
        }

        self.attempt_store.clear(&email).await;
        info!("Authentication successful for user ID: {}", user.id);

        self.issue_session(user).await
    }

    /// Generic registration: creates the credential record only, with a
    /// caller-chosen role.
    pub async fn register(&self, payload: RegisterDto) -> Result<AuthSession, ApiError> {
        let role = parse_role(&payload.role)?;
        require_non_blank(&payload.name, "Name")?;
        let email = normalized_required_email(&payload.email)?;
        password::validate(&payload.password)?;

        self.ensure_email_free(&email).await?;

        let user = self
            .insert_user(payload.name.trim(), &email, &payload.password, role, None)
            .await?;

        self.issue_session(user).await
    }

    /// Admin registration bootstraps the college record (resolved by domain,
    /// created on first use) and enforces one admin per college.
    pub async fn register_admin(&self, payload: AdminRegisterDto) -> Result<AuthSession, ApiError> {
        require_non_blank(&payload.admin_name, "Admin name")?;
        require_non_blank(&payload.college_name, "College name")?;
        require_non_blank(&payload.college_domain, "College domain")?;
        let email = normalized_required_email(&payload.admin_email)?;
        password::validate(&payload.password)?;

        self.ensure_email_free(&email).await?;

        let college = self.resolve_college(&payload).await?;

        match self.admin_repo.exists_for_college(college.id).await {
            Ok(true) => return Err(AuthError::ConflictingAdmin)?,
            Ok(false) => {}
            Err(e) => return Err(storage_failure("Admin lookup failed", e)),
        }

        let user = self
            .insert_user(
                payload.admin_name.trim(),
                &email,
                &payload.password,
                Role::Admin,
                Some(college.id),
            )
            .await?;

        let new_admin = NewAdmin {
            name: payload.admin_name.trim().to_string(),
            email: email.clone(),
            phone_number: payload.phone_number,
            role_title: payload.role_title,
            college_id: college.id,
        };
        if let Err(e) = self.admin_repo.insert(new_admin).await {
            // UNIQUE (college_id) closes the race between concurrent admin
            // registrations for the same college.
            if is_unique_violation(&e) {
                return Err(AuthError::ConflictingAdmin)?;
            }
            return Err(storage_failure("Admin creation failed", e));
        }

        self.issue_session(user).await
    }

    pub async fn register_student(
        &self,
        payload: StudentRegisterDto,
    ) -> Result<AuthSession, ApiError> {
        require_non_blank(&payload.name, "Student name")?;
        require_non_blank(&payload.register_number, "Register number")?;
        require_non_blank(&payload.department, "Department")?;
        let email = normalized_required_email(&payload.email)?;
        password::validate(&payload.password)?;

        self.ensure_email_free(&email).await?;
        match self.student_repo.email_exists(&email).await {
            Ok(true) => return Err(AuthError::DuplicateEmail)?,
            Ok(false) => {}
            Err(e) => return Err(storage_failure("Student email check failed", e)),
        }

        match self
            .student_repo
            .register_number_exists(payload.register_number.trim())
            .await
        {
            Ok(true) => return Err(AuthError::DuplicateIdentifier("Register number".to_string()))?,
            Ok(false) => {}
            Err(e) => return Err(storage_failure("Register number check failed", e)),
        }

        let college = self.load_college(payload.college_id).await?;

        let user = self
            .insert_user(
                payload.name.trim(),
                &email,
                &payload.password,
                Role::Student,
                Some(college.id),
            )
            .await?;

        let new_student = NewStudent {
            name: payload.name.trim().to_string(),
            email: email.clone(),
            register_number: payload.register_number.trim().to_string(),
            year: payload.year,
            department: Some(payload.department.trim().to_string()),
            phone_number: payload.phone_number,
            college_id: college.id,
        };
        if let Err(e) = self.student_repo.insert(new_student).await {
            if is_unique_violation(&e) {
                return Err(AuthError::DuplicateIdentifier("Register number".to_string()))?;
            }
            return Err(storage_failure("Student creation failed", e));
        }

        self.issue_session(user).await
    }

    pub async fn register_trainer(
        &self,
        payload: TrainerRegisterDto,
    ) -> Result<AuthSession, ApiError> {
        require_non_blank(&payload.name, "Trainer name")?;
        require_non_blank(&payload.teacher_id, "Teacher ID")?;
        require_non_blank(&payload.department, "Department")?;
        let email = normalized_required_email(&payload.email)?;
        password::validate(&payload.password)?;

        self.ensure_email_free(&email).await?;
        match self.trainer_repo.email_exists(&email).await {
            Ok(true) => return Err(AuthError::DuplicateEmail)?,
            Ok(false) => {}
            Err(e) => return Err(storage_failure("Trainer email check failed", e)),
        }

        match self
            .trainer_repo
            .teacher_id_exists(payload.teacher_id.trim())
            .await
        {
            Ok(true) => return Err(AuthError::DuplicateIdentifier("Teacher ID".to_string()))?,
            Ok(false) => {}
            Err(e) => return Err(storage_failure("Teacher ID check failed", e)),
        }

        let college = self.load_college(payload.college_id).await?;

        let user = self
            .insert_user(
                payload.name.trim(),
                &email,
                &payload.password,
                Role::Trainer,
                Some(college.id),
            )
            .await?;

        let new_trainer = NewTrainer {
            name: payload.name.trim().to_string(),
            email: email.clone(),
            teacher_id: payload.teacher_id.trim().to_string(),
            department: Some(payload.department.trim().to_string()),
            specialization: payload.specialization,
            phone_number: payload.phone_number,
            bio: payload.bio,
            college_id: college.id,
        };
        if let Err(e) = self.trainer_repo.insert(new_trainer).await {
            if is_unique_violation(&e) {
                return Err(AuthError::DuplicateIdentifier("Teacher ID".to_string()))?;
            }
            return Err(storage_failure("Trainer creation failed", e));
        }

        self.issue_session(user).await
    }

    /// Exchanges a live refresh token for a new access/refresh pair. The old
    /// refresh token stops working as a side effect of rotation.
    pub async fn refresh(&self, refresh_token_value: &str) -> Result<AuthSession, ApiError> {
        let found = self
            .refresh_token_service
            .find_by_token(refresh_token_value)
            .await
            .ok_or(TokenError::InvalidRefreshToken)?;

        let verified = self.refresh_token_service.verify_expiration(found).await?;

        let user = self
            .user_repo
            .find(verified.user_id)
            .await
            .map_err(|e| {
                secure_log::secure_error!("Refresh token owner lookup failed", e);
                ApiError::Token(TokenError::InvalidRefreshToken)
            })?;

        info!("Refresh token exchanged for user ID: {}", user.id);
        self.issue_session(user).await
    }

    /// Removes the caller's ledger entry. Unknown tokens are ignored, so a
    /// repeated logout is not an error.
    pub async fn logout(&self, refresh_token_value: &str) -> Result<(), ApiError> {
        if let Some(token) = self
            .refresh_token_service
            .find_by_token(refresh_token_value)
            .await
        {
            self.refresh_token_service
                .delete_by_user_id(token.user_id)
                .await?;
            info!("Logout completed for user ID: {}", token.user_id);
        }
        Ok(())
    }

    pub async fn get_current_user_profile(&self, email: &str) -> Result<User, ApiError> {
        self.user_repo
            .find_by_email(&normalize_email(email))
            .await
            .ok_or_else(|| ApiError::Auth(AuthError::NotFound("User".to_string())))
    }

    async fn issue_session(&self, user: User) -> Result<AuthSession, ApiError> {
        let authority = Role::parse(&user.role)
            .map(|role| role.authority())
            .unwrap_or_else(|| format!("ROLE_{}", user.role.to_uppercase()));

        let access = self.token_service.issue(&user.email, vec![authority])?;
        let refresh = self.refresh_token_service.create_refresh_token(user.id).await?;

        Ok(AuthSession {
            user,
            access,
            refresh_token: refresh.token,
        })
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), ApiError> {
        match self.user_repo.email_exists(email).await {
            Ok(true) => Err(AuthError::DuplicateEmail)?,
            Ok(false) => Ok(()),
            Err(e) => Err(storage_failure("Email check failed", e)),
        }
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        plain_password: &str,
        role: Role,
        college_id: Option<Uuid>,
    ) -> Result<User, ApiError> {
        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(plain_password)?,
            role: role.as_str().to_string(),
            college_id,
        };

        match self.user_repo.insert(new_user).await {
            Ok(user) => Ok(user),
            // The unique index on users.email is the backstop behind the
            // pre-check above.
            Err(e) if is_unique_violation(&e) => Err(AuthError::DuplicateEmail)?,
            Err(e) => Err(storage_failure("User creation failed", e)),
        }
    }

    async fn resolve_college(&self, payload: &AdminRegisterDto) -> Result<College, ApiError> {
        let domain = payload.college_domain.trim().to_lowercase();

        if let Some(existing) = self.college_repo.find_by_domain(&domain).await {
            return Ok(existing);
        }

        let new_college = NewCollege {
            name: payload.college_name.trim().to_string(),
            domain,
            website_url: payload.college_website.clone(),
            contact_email: payload.college_contact_email.clone(),
            contact_phone: payload.college_contact_phone.clone(),
            address: payload.college_address.clone(),
        };
        self.college_repo
            .insert(new_college)
            .await
            .map_err(|e| storage_failure("College creation failed", e))
    }

    async fn load_college(&self, college_id: Uuid) -> Result<College, ApiError> {
        match self.college_repo.find(college_id).await {
            Ok(Some(college)) => Ok(college),
            Ok(None) => Err(AuthError::InvalidInput("College not found".to_string()))?,
            Err(e) => Err(storage_failure("College lookup failed", e)),
        }
    }
}

/// Lowercase, trimmed form used for every store lookup and write.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn normalized_required_email(email: &str) -> Result<String, AuthError> {
    require_non_blank(email, "Email")?;
    Ok(normalize_email(email))
}

fn require_non_blank(value: &str, field: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

fn parse_role(raw: &str) -> Result<Role, AuthError> {
    Role::parse(raw).ok_or_else(|| AuthError::InvalidInput(format!("Invalid role: {}", raw)))
}

fn hash_password(plain: &str) -> Result<String, ApiError> {
    let bcrypt_cost = parameter::get_u64("BCRYPT_COST") as u32;
    bcrypt::hash(plain, bcrypt_cost).map_err(|e| {
        secure_log::secure_error!("Failed to hash password", e);
        ApiError::Db(DbError::SomethingWentWrong("Password hashing failed".to_string()))
    })
}

/// Delegated one-way comparison; a hasher-level error counts as a mismatch
/// rather than leaking a distinct failure mode.
fn verify_password(plain: &str, user: &User) -> bool {
    match bcrypt::verify(plain, &user.password) {
        Ok(is_valid) => is_valid,
        Err(e) => {
            secure_log::secure_error!("Password verification system error", e);
            false
        }
    }
}

fn storage_failure(context: &str, error: sqlx::Error) -> ApiError {
    secure_log::secure_error!(context, error);
    ApiError::Db(DbError::SomethingWentWrong(context.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_folds_case_and_whitespace() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
        // Scenario: "a@x.com" vs "A@X.com" must collide.
        assert_eq!(normalize_email("A@X.com"), normalize_email("a@x.com"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_non_blank("  ", "Name").is_err());
        assert!(require_non_blank("", "Name").is_err());
        assert!(require_non_blank("x", "Name").is_ok());
    }

    #[test]
    fn role_membership_is_enforced() {
        assert!(parse_role("STUDENT").is_ok());
        assert!(parse_role("trainer").is_ok());
        assert!(matches!(
            parse_role("ROOT"),
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[test]
    fn stored_hash_never_equals_plaintext() {
        crate::config::init_test_config();

        let plain = "Str0ng#Password";
        let hash = hash_password(plain).unwrap();

        assert_ne!(hash, plain);
        assert!(bcrypt::verify(plain, &hash).unwrap());
        assert!(!bcrypt::verify("Wr0ng#Password", &hash).unwrap());
    }
}
