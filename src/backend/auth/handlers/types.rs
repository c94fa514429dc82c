/**
 * Authentication Handler Types
 *
 * Form bodies accepted by the authentication endpoints and the JSON
 * envelopes they answer with.
 */

use crate::backend::server::config::parse_bool;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};

/// Registration form
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub mail: String,
    pub name: String,
    /// Plaintext, hashed before anything is stored
    pub password: String,
}

/// Login form
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// Name, or mail address
    pub name: String,
    pub password: String,
    /// 30-day session with a persistent cookie when set
    ///
    /// Accepts `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, which
    /// covers HTML checkboxes.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stay_logged_in: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_bool(&value)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&value), &"a boolean flag"))
}

/// Plain `{status, message}` envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: u16,
    pub message: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            message: "OK".to_string(),
        }
    }
}

/// Envelope describing the caller's active session
///
/// The token itself is never echoed back.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionResponse {
    pub status: u16,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}
