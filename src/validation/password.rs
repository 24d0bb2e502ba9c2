use crate::error::auth_error::AuthError;
use regex::Regex;
use std::sync::OnceLock;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 30;

/// Lookahead-free equivalent of the classic policy regex: length bounds are
/// checked separately, each required character class with its own pattern.
fn patterns() -> &'static [Regex; 5] {
    static PATTERNS: OnceLock<[Regex; 5]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"[a-z]").unwrap(),
            Regex::new(r"[A-Z]").unwrap(),
            Regex::new(r"[0-9]").unwrap(),
            Regex::new(r"[@#$%^&+=!]").unwrap(),
            Regex::new(r"\s").unwrap(),
        ]
    })
}

/// Enforced before any credential write. Violations never reach the store.
pub fn validate(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_LENGTH || password.len() > MAX_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "Password must be between {} and {} characters long",
            MIN_LENGTH, MAX_LENGTH
        )));
    }

    let [lower, upper, digit, symbol, whitespace] = patterns();

    let ok = lower.is_match(password)
        && upper.is_match(password)
        && digit.is_match(password)
        && symbol.is_match(password)
        && !whitespace.is_match(password);

    if !ok {
        return Err(AuthError::InvalidInput(
            "Password must contain at least one digit, one lowercase letter, \
             one uppercase letter, one special character, and no whitespace"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_compliant_passwords() {
        assert!(validate("Aa1@aaaa").is_ok());
        assert!(validate("Str0ng#Password").is_ok());
        assert!(validate("xY9=abcdefghij").is_ok());
    }

    #[test]
    fn rejects_length_violations() {
        assert!(validate("Aa1@aaa").is_err()); // 7 chars
        assert!(validate(&format!("Aa1@{}", "a".repeat(27))).is_err()); // 31 chars
    }

    #[test]
    fn rejects_missing_character_classes() {
        assert!(validate("aa1@aaaa").is_err()); // no uppercase
        assert!(validate("AA1@AAAA").is_err()); // no lowercase
        assert!(validate("Aaa@aaaa").is_err()); // no digit
        assert!(validate("Aa1aaaaa").is_err()); // no symbol
    }

    #[test]
    fn rejects_whitespace() {
        assert!(validate("Aa1@ aaaa").is_err());
        assert!(validate("Aa1@\taaa").is_err());
    }
}
