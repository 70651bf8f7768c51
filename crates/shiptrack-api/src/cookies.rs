//! Auth cookie construction.
//!
//! Both tokens travel as HttpOnly, SameSite=Strict cookies, mirroring the
//! TTLs of the JWTs they carry.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use shiptrack_core::config::auth::AuthConfig;

/// Name of the access token cookie.
pub const ACCESS_COOKIE: &str = "access_token";
/// Name of the refresh token cookie.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build the access token cookie.
pub fn access_cookie(token: &str, config: &AuthConfig) -> Cookie<'static> {
    build(
        ACCESS_COOKIE,
        token,
        Duration::minutes(config.access_ttl_minutes as i64),
        config.secure_cookies,
    )
}

/// Build the refresh token cookie.
pub fn refresh_cookie(token: &str, config: &AuthConfig) -> Cookie<'static> {
    build(
        REFRESH_COOKIE,
        token,
        Duration::days(config.refresh_ttl_days as i64),
        config.secure_cookies,
    )
}

/// Build an expired cookie that clears the named token on the client.
pub fn removal_cookie(name: &'static str, config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = build(name, "", Duration::ZERO, config.secure_cookies);
    cookie.make_removal();
    cookie
}

fn build(name: &'static str, value: &str, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(max_age)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            reset_ttl_hours: 1,
            password_min_length: 8,
            secure_cookies: true,
            admin_email: "admin@shiptrack.local".to_string(),
            admin_password: String::new(),
            client_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = access_cookie("tok", &test_config());
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::minutes(15)));
    }

    #[test]
    fn test_refresh_cookie_ttl() {
        let cookie = refresh_cookie("tok", &test_config());
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
    }
}
