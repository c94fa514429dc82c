/**
 * Logout Handler
 *
 * POST /api/v1/authentication/logout
 *
 * Revokes the session named by the request's `session` cookie and clears
 * the cookie.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::types::StatusResponse;
use crate::backend::auth::sessions::SESSION_COOKIE_NAME;
use crate::backend::auth::workflow::AuthWorkflow;
use crate::backend::cookies::CookiePolicy;
use crate::backend::error::BackendError;

/// Logout handler
///
/// # Errors
///
/// * `404 Not Found` - the request has no session cookie
pub async fn logout(
    State(auth): State<AuthWorkflow>,
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<StatusResponse>), BackendError> {
    let token = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string());
    auth.logout(token.as_deref()).await?;

    let jar = jar.add(policy.removal(SESSION_COOKIE_NAME));
    Ok((jar, Json(StatusResponse::ok())))
}
