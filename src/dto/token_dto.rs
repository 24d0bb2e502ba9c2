use serde::{Deserialize, Serialize};

/// Freshly issued access token plus its timestamps.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenReadDto {
    pub token: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by an access token. Subject is the account email; roles
/// are authority strings (ROLE_ADMIN, ...).
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}
