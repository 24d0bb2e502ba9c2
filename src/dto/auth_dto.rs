use crate::entity::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginDto {
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Generic registration: any role, no role-specific profile record.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Admin registration also bootstraps (or joins) the college record;
/// the college may not already have an admin.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct AdminRegisterDto {
    #[validate(length(min = 1, message = "Admin name is required"))]
    pub admin_name: String,
    #[validate(email(message = "Email format is invalid"))]
    pub admin_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub phone_number: Option<String>,
    pub role_title: Option<String>,
    #[validate(length(min = 1, message = "College name is required"))]
    pub college_name: String,
    #[validate(length(min = 1, message = "College domain is required"))]
    pub college_domain: String,
    pub college_website: Option<String>,
    pub college_contact_email: Option<String>,
    pub college_contact_phone: Option<String>,
    pub college_address: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct StudentRegisterDto {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub name: String,
    #[validate(email(message = "Email format is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Register number is required"))]
    pub register_number: String,
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub phone_number: Option<String>,
    pub college_id: Uuid,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct TrainerRegisterDto {
    #[validate(length(min = 1, message = "Trainer name is required"))]
    pub name: String,
    #[validate(email(message = "Email format is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Teacher ID is required"))]
    pub teacher_id: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub specialization: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub college_id: Uuid,
}

/// Auth endpoints all answer with the account profile. The token pair never
/// appears in the JSON body - it travels only in the Set-Cookie headers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<Uuid>,
}

impl AuthResponseDto {
    pub fn profile_of(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            college_id: user.college_id,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LogoutResponseDto {
    pub message: String,
}

impl std::fmt::Debug for LoginDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginDto").field("email", &self.email).finish()
    }
}

impl std::fmt::Debug for RegisterDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterDto")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}
