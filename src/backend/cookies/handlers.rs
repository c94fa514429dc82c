/**
 * Cookie Management Handlers
 *
 * Generic endpoints for reading and writing browser cookies. They do not
 * touch the database; every cookie they set goes through the shared
 * `CookiePolicy`.
 *
 * Editing or deleting a cookie the request does not carry is a silent no-op
 * rather than an error. Malformed bodies and expiry dates that overflow
 * get a 422 in the usual JSON envelope.
 */

use crate::backend::cookies::policy::CookiePolicy;
use crate::backend::cookies::types::{BaseCookie, CookieResponse, EditCookie, FullCookie};
use crate::backend::error::BackendError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Extra lifetime added on top of the client-supplied expiry
pub const COOKIE_EXTENSION_DAYS: i64 = 30;

type CookieResult<T> = Result<(CookieJar, Json<CookieResponse<T>>), BackendError>;

/// `expires` pushed out by [`COOKIE_EXTENSION_DAYS`]
///
/// # Errors
///
/// * `422` - the extended date overflows
pub fn extend_expiry(expires: DateTime<Utc>) -> Result<DateTime<Utc>, BackendError> {
    expires
        .checked_add_signed(Duration::days(COOKIE_EXTENSION_DAYS))
        .ok_or_else(|| {
            BackendError::handler(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Cookie expiry out of range: {expires}"),
            )
        })
}

/// GET /api/v1/cookies/get_cookies
///
/// Echoes every cookie the request carried.
pub async fn get_cookies(jar: CookieJar) -> Json<CookieResponse<BTreeMap<String, String>>> {
    let cookies = jar
        .iter()
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
        .collect::<BTreeMap<_, _>>();

    tracing::debug!("Get cookies: {} present", cookies.len());
    Json(CookieResponse::ok("Get Cookies", cookies))
}

/// POST /api/v1/cookies/set_cookie
///
/// Sets `name=value`, expiring 30 days after the supplied `expires`.
pub async fn set_cookie(
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
    body: Result<Json<FullCookie>, JsonRejection>,
) -> CookieResult<FullCookie> {
    let Json(data) = body?;
    let expires = extend_expiry(data.expires)?;
    let jar = jar.add(policy.build_expiring(data.name.clone(), data.value.clone(), expires)?);

    tracing::debug!("Set cookie: {}", data.name);
    Ok((jar, Json(CookieResponse::ok("Set Cookie", data))))
}

/// POST /api/v1/cookies/edit_cookie
///
/// With `value`: replaces the value, leaving a browser-session cookie.
/// With `expires`: keeps the current value and moves the expiry to
/// `expires` + 30 days.
pub async fn edit_cookie(
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
    body: Result<Json<EditCookie>, JsonRejection>,
) -> CookieResult<EditCookie> {
    let Json(data) = body?;
    let Some(current) = jar.get(data.name()).map(|c| c.value().to_string()) else {
        tracing::debug!("Edit cookie skipped, not present: {}", data.name());
        return Ok((jar, Json(CookieResponse::ok("Edit Cookie", data))));
    };

    let cookie = match &data {
        EditCookie::Valued { name, value } => policy.build(name.clone(), value.clone()),
        EditCookie::Timed { name, expires } => {
            policy.build_expiring(name.clone(), current, extend_expiry(*expires)?)?
        }
    };

    tracing::debug!("Edit cookie: {}", data.name());
    Ok((jar.add(cookie), Json(CookieResponse::ok("Edit Cookie", data))))
}

/// DELETE /api/v1/cookies/delete_cookie
pub async fn delete_cookie(
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
    body: Result<Json<BaseCookie>, JsonRejection>,
) -> CookieResult<BaseCookie> {
    let Json(data) = body?;
    let jar = jar.add(policy.removal(data.name.clone()));

    tracing::debug!("Delete cookie: {}", data.name);
    Ok((jar, Json(CookieResponse::ok("Delete Cookie", data))))
}
