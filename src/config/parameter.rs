use dotenv;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values. Secrets (JWT_SECRET, DATABASE_URL) have no
/// default and must come from the environment.
const DEFAULTS: &[(&str, &str)] = &[
    ("SERVER_ADDRESS", "127.0.0.1"),
    ("SERVER_PORT", "8080"),
    ("LOG_LEVEL", "info"),
    // Access tokens: 24 hours.
    ("JWT_TTL_IN_MINUTES", "1440"),
    // Refresh tokens: 7 days, one live token per user.
    ("REFRESH_TOKEN_TTL_DAYS", "7"),
    ("BCRYPT_COST", "12"),
    // Token cookies
    ("ACCESS_COOKIE_NAME", "SB_ACCESS"),
    ("REFRESH_COOKIE_NAME", "SB_REFRESH"),
    ("COOKIE_SECURE", "true"),
    ("COOKIE_SAME_SITE", "Strict"),
    ("COOKIE_DOMAIN", ""),
    // Login lockout
    ("LOGIN_MAX_ATTEMPTS", "5"),
    ("LOGIN_BLOCK_DURATION_MINUTES", "30"),
    ("LOGIN_ATTEMPT_CLEANUP_INTERVAL_MINUTES", "60"),
    // Recommendation engine
    ("RECOMMENDATION_ELIGIBLE_STATUSES", "ACTIVE"),
    ("RECOMMENDATION_LIMIT", "5"),
];

pub fn init() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let mut config = HashMap::new();

    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }

    // Environment overrides defaults; secrets only exist via environment.
    for (key, value) in std::env::vars() {
        config.insert(key, value);
    }

    if CONFIG.set(config).is_err() {
        error!("Configuration already initialized");
    } else {
        info!("Configuration initialized successfully");
    }
}

pub fn get(parameter: &str) -> String {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
        .unwrap_or_else(|| {
            error!("Configuration parameter '{}' not found", parameter);
            panic!("Required configuration parameter '{}' is missing", parameter);
        })
}

pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
}

pub fn get_i64(parameter: &str) -> i64 {
    let value = get(parameter);
    value.parse::<i64>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid i64: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid i64", parameter);
    })
}

pub fn get_u64(parameter: &str) -> u64 {
    let value = get(parameter);
    value.parse::<u64>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid u64: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid u64", parameter);
    })
}

pub fn get_bool(parameter: &str) -> bool {
    let value = get(parameter).to_lowercase();
    matches!(value.as_str(), "true" | "1" | "yes" | "on")
}

/// Seed the store with defaults plus a throwaway signing secret so unit tests
/// can construct services without a .env file. Safe to call repeatedly.
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let mut config = HashMap::new();
    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }
    config.insert(
        "JWT_SECRET".to_string(),
        "unit-test-signing-secret-0123456789abcdef".to_string(),
    );
    let _ = CONFIG.set(config);
}
