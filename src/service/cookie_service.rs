use crate::config::parameter;

/// Builds and parses the HTTP-only token cookies. Access and refresh cookies
/// share attributes; max-age always matches the corresponding token TTL.
#[derive(Clone)]
pub struct CookieService {
    access_name: String,
    refresh_name: String,
    secure: bool,
    same_site: String,
    domain: Option<String>,
    access_max_age_seconds: i64,
    refresh_max_age_seconds: i64,
}

impl CookieService {
    pub fn from_parameters() -> Self {
        let domain = parameter::get("COOKIE_DOMAIN");

        Self {
            access_name: parameter::get("ACCESS_COOKIE_NAME"),
            refresh_name: parameter::get("REFRESH_COOKIE_NAME"),
            secure: parameter::get_bool("COOKIE_SECURE"),
            same_site: parameter::get("COOKIE_SAME_SITE"),
            domain: if domain.is_empty() { None } else { Some(domain) },
            access_max_age_seconds: parameter::get_i64("JWT_TTL_IN_MINUTES") * 60,
            refresh_max_age_seconds: parameter::get_i64("REFRESH_TOKEN_TTL_DAYS") * 24 * 60 * 60,
        }
    }

    pub fn access_cookie(&self, token: &str) -> String {
        self.build(&self.access_name, token, self.access_max_age_seconds)
    }

    pub fn refresh_cookie(&self, token: &str) -> String {
        self.build(&self.refresh_name, token, self.refresh_max_age_seconds)
    }

    /// Clearing is an empty value with Max-Age=0.
    pub fn clear_access_cookie(&self) -> String {
        self.build(&self.access_name, "", 0)
    }

    pub fn clear_refresh_cookie(&self) -> String {
        self.build(&self.refresh_name, "", 0)
    }

    pub fn extract_access_token(&self, cookie_header: &str) -> Option<String> {
        extract_cookie_value(cookie_header, &self.access_name)
    }

    pub fn extract_refresh_token(&self, cookie_header: &str) -> Option<String> {
        extract_cookie_value(cookie_header, &self.refresh_name)
    }

    fn build(&self, name: &str, value: &str, max_age_seconds: i64) -> String {
        let mut cookie = format!("{}={}; HttpOnly", name, value);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site));
        cookie.push_str("; Path=/");
        cookie.push_str(&format!("; Max-Age={}", max_age_seconds));
        if let Some(domain) = &self.domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }
        cookie
    }
}

fn extract_cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some((cookie_name, value)) = cookie.split_once('=') {
            if cookie_name.trim() == name && !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CookieService {
        crate::config::init_test_config();
        CookieService::from_parameters()
    }

    #[test]
    fn access_cookie_carries_required_attributes() {
        let cookies = service();
        let cookie = cookies.access_cookie("token-value-123");

        assert!(cookie.starts_with("SB_ACCESS=token-value-123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        // Default access TTL is 24h.
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn refresh_cookie_max_age_matches_ttl() {
        let cookies = service();
        let cookie = cookies.refresh_cookie("refresh-value");

        assert!(cookie.starts_with("SB_REFRESH=refresh-value"));
        assert!(cookie.contains("Max-Age=604800")); // 7 days
    }

    #[test]
    fn clear_cookies_are_empty_with_zero_max_age() {
        let cookies = service();

        let cleared = cookies.clear_refresh_cookie();
        assert!(cleared.starts_with("SB_REFRESH=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn extracts_named_cookie_from_header() {
        let cookies = service();
        let header = "session=abc; SB_REFRESH=the-refresh-token; other=1";

        assert_eq!(
            cookies.extract_refresh_token(header),
            Some("the-refresh-token".to_string())
        );
        assert_eq!(cookies.extract_access_token(header), None);
    }

    #[test]
    fn blank_cookie_values_count_as_missing() {
        let cookies = service();
        assert_eq!(cookies.extract_refresh_token("SB_REFRESH="), None);
        assert_eq!(cookies.extract_refresh_token(""), None);
    }
}
