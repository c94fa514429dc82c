/**
 * Session Issuer
 *
 * Mints session tokens and decides how long they live.
 *
 * Tokens are 32 bytes from the OS RNG rendered as URL-safe base64, which
 * keeps them cookie-safe without quoting. Expiry is 24 hours for a plain
 * login and 30 days when the user asked to stay logged in.
 */

use crate::backend::db::Session;
use crate::backend::error::BackendError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};

/// Cookie name every session token is delivered under
pub const SESSION_COOKIE_NAME: &str = "session";

/// Token entropy in bytes
pub const TOKEN_BYTES: usize = 32;

/// Lifetime of a session without "stay logged in", in hours
pub const SESSION_TTL_HOURS: i64 = 24;

/// Lifetime of a remembered session, in days
pub const REMEMBER_TTL_DAYS: i64 = 30;

/// Expiry policy for a new session
pub fn session_ttl(remember: bool) -> Duration {
    if remember {
        Duration::days(REMEMBER_TTL_DAYS)
    } else {
        Duration::hours(SESSION_TTL_HOURS)
    }
}

/// Generate a random session token
pub fn generate_token() -> Result<String, BackendError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| BackendError::crypto(format!("OS random source unavailable: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Issue a session starting at `now`
pub fn issue_at(remember: bool, now: DateTime<Utc>) -> Result<Session, BackendError> {
    Ok(Session {
        name: SESSION_COOKIE_NAME.to_string(),
        token: generate_token()?,
        expires_at: now + session_ttl(remember),
    })
}

/// Issue a session starting now
pub fn issue(remember: bool) -> Result<Session, BackendError> {
    issue_at(remember, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_default_expiry() {
        let now = Utc::now();
        let session = issue_at(false, now).unwrap();
        assert_eq!(session.name, SESSION_COOKIE_NAME);
        assert_eq!(session.expires_at - now, Duration::hours(24));
    }

    #[test]
    fn test_issue_remembered_expiry() {
        let now = Utc::now();
        let session = issue_at(true, now).unwrap();
        assert_eq!(session.expires_at - now, Duration::days(30));
    }

    #[test]
    fn test_tokens_are_unique_and_cookie_safe() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
        // 32 bytes -> 43 unpadded base64 chars
        assert_eq!(a.len(), 43);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_issued_session_is_active() {
        assert!(issue(false).unwrap().is_active());
    }
}
