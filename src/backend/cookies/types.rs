/**
 * Cookie Handler Types
 *
 * Request bodies and the response envelope for the cookie endpoints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cookie addressed by name only
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseCookie {
    pub name: String,
}

/// A cookie with value and client-chosen expiry
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FullCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
}

/// Edit request: either a new value or a new expiry
///
/// A body carrying both is treated as a value edit.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EditCookie {
    Valued { name: String, value: String },
    Timed { name: String, expires: DateTime<Utc> },
}

impl EditCookie {
    pub fn name(&self) -> &str {
        match self {
            Self::Valued { name, .. } | Self::Timed { name, .. } => name,
        }
    }
}

/// Response envelope carrying the affected cookie data
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CookieResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> CookieResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data,
        }
    }
}
