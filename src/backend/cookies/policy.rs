/**
 * Cookie Policy
 *
 * One set of cookie attributes for every cookie the server writes, the
 * session cookie included. `HttpOnly` and `Path=/` are fixed; `Secure` and
 * `SameSite` come from configuration.
 */

use crate::backend::db::Session;
use crate::backend::error::BackendError;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

/// Attributes applied to every cookie the server sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::None,
        }
    }
}

impl CookiePolicy {
    pub fn new(secure: bool, same_site: SameSite) -> Self {
        Self { secure, same_site }
    }

    /// Cookie without an explicit expiry (lives for the browser session)
    pub fn build(&self, name: impl Into<String>, value: impl Into<String>) -> Cookie<'static> {
        Cookie::build((name.into(), value.into()))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path("/")
            .build()
    }

    /// Cookie that expires at `expires`
    ///
    /// # Errors
    ///
    /// * `422` - `expires` cannot be written as a cookie date
    pub fn build_expiring(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Result<Cookie<'static>, BackendError> {
        let mut cookie = self.build(name, value);
        cookie.set_expires(to_offset_datetime(expires)?);
        Ok(cookie)
    }

    /// Cookie that tells the browser to drop `name`
    pub fn removal(&self, name: impl Into<String>) -> Cookie<'static> {
        let mut cookie = self.build(name, "");
        cookie.make_removal();
        cookie
    }

    /// Cookie carrying a session token
    ///
    /// Persistent sessions get an explicit expiry matching the stored row.
    /// Otherwise the cookie dies with the browser session while the row
    /// expires on its own after 24 hours.
    pub fn session_cookie(
        &self,
        session: &Session,
        persistent: bool,
    ) -> Result<Cookie<'static>, BackendError> {
        if persistent {
            self.build_expiring(session.name.clone(), session.token.clone(), session.expires_at)
        } else {
            Ok(self.build(session.name.clone(), session.token.clone()))
        }
    }
}

/// Parse a `SameSite` setting (`strict`, `lax`, `none`, case-insensitive)
pub fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

fn to_offset_datetime(value: DateTime<Utc>) -> Result<OffsetDateTime, BackendError> {
    OffsetDateTime::from_unix_timestamp(value.timestamp()).map_err(|_| {
        BackendError::handler(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Cookie expiry out of range: {value}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_build_applies_policy() {
        let cookie = CookiePolicy::default().build("theme", "dark");
        let rendered = cookie.to_string();
        assert!(rendered.starts_with("theme=dark"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Path=/"));
        assert!(!rendered.contains("Expires"));
    }

    #[test]
    fn test_insecure_policy() {
        let cookie = CookiePolicy::new(false, SameSite::Lax).build("a", "b");
        let rendered = cookie.to_string();
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
    }

    #[test]
    fn test_build_expiring() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let cookie = CookiePolicy::default()
            .build_expiring("a", "b", expires)
            .unwrap();
        let at = cookie.expires_datetime().unwrap();
        assert_eq!(at.unix_timestamp(), expires.timestamp());
    }

    #[test]
    fn test_build_expiring_rejects_unrepresentable_date() {
        // Valid for chrono, beyond what a cookie date can carry
        let expires = Utc.with_ymd_and_hms(50_000, 1, 1, 0, 0, 0).unwrap();
        let err = CookiePolicy::default()
            .build_expiring("a", "b", expires)
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_removal() {
        let cookie = CookiePolicy::default().removal("session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert!(cookie.http_only().unwrap_or(false));
    }

    #[test]
    fn test_session_cookie_persistence() {
        let session = Session {
            name: "session".to_string(),
            token: "tok".to_string(),
            expires_at: Utc::now() + Duration::days(30),
        };
        let policy = CookiePolicy::default();

        assert!(policy
            .session_cookie(&session, true)
            .unwrap()
            .expires_datetime()
            .is_some());
        assert!(policy
            .session_cookie(&session, false)
            .unwrap()
            .expires()
            .is_none());
    }

    #[test]
    fn test_parse_same_site() {
        assert_eq!(parse_same_site("Strict"), Some(SameSite::Strict));
        assert_eq!(parse_same_site(" lax "), Some(SameSite::Lax));
        assert_eq!(parse_same_site("NONE"), Some(SameSite::None));
        assert_eq!(parse_same_site("sometimes"), None);
    }
}
