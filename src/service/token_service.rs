use crate::config::parameter;
use crate::dto::token_dto::{TokenClaimsDto, TokenReadDto};
use crate::error::token_error::TokenError;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    token_expiration_minutes: i64,
}

pub trait TokenServiceTrait {
    fn new() -> Result<Self, TokenError>
    where
        Self: Sized;
    /// Mints a signed access token for the subject (account email) carrying
    /// the given role claims. Stateless; validity is signature + expiry only.
    fn issue(&self, subject: &str, roles: Vec<String>) -> Result<TokenReadDto, TokenError>;
    /// Checks signature and expiry and returns the claims. Expiry and
    /// tampering are distinct failures.
    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
}

impl TokenServiceTrait for TokenService {
    fn new() -> Result<Self, TokenError> {
        let secret = parameter::get("JWT_SECRET");

        // 256-bit minimum for HS256.
        if secret.len() < 32 {
            return Err(TokenError::TokenCreationError(format!(
                "JWT secret must be at least 32 bytes, current length: {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            token_expiration_minutes: parameter::get_i64("JWT_TTL_IN_MINUTES"),
        })
    }

    fn issue(&self, subject: &str, roles: Vec<String>) -> Result<TokenReadDto, TokenError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(self.token_expiration_minutes))
            .ok_or_else(|| {
                TokenError::TokenCreationError("Token expiration calculation overflow".to_string())
            })?
            .timestamp();

        let claims = TokenClaimsDto {
            sub: subject.to_string(),
            roles,
            iat,
            exp,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))?;

        Ok(TokenReadDto { token, iat, exp })
    }

    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // clock skew

        match decode::<TokenClaimsDto>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        ) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::TokenExpired),
                _ => Err(TokenError::InvalidToken),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        crate::config::init_test_config();
        TokenService::new().unwrap()
    }

    #[test]
    fn issue_verify_round_trip() {
        let service = service();
        let issued = service
            .issue("student@college.edu", vec!["ROLE_STUDENT".to_string()])
            .unwrap();

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "student@college.edu");
        assert_eq!(claims.roles, vec!["ROLE_STUDENT".to_string()]);
        assert_eq!(claims.iat, issued.iat);
        assert_eq!(claims.exp, issued.exp);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = service();
        let issued = service
            .issue("student@college.edu", vec!["ROLE_STUDENT".to_string()])
            .unwrap();

        // Flip one byte in the payload segment.
        let mut bytes = issued.token.into_bytes();
        let payload_pos = bytes.iter().position(|&b| b == b'.').unwrap() + 2;
        bytes[payload_pos] = if bytes[payload_pos] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(service.verify(&tampered), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = service();

        // Encode claims already past expiry (beyond the 30s leeway) with the
        // same test secret.
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaimsDto {
            sub: "student@college.edu".to_string(),
            roles: vec!["ROLE_STUDENT".to_string()],
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("unit-test-signing-secret-0123456789abcdef".as_ref()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::TokenExpired)));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = service();
        assert!(matches!(service.verify("not-a-jwt"), Err(TokenError::InvalidToken)));
    }
}
