/**
 * Current Session Handler
 *
 * GET /api/v1/authentication/session
 *
 * Reports whether the request's `session` cookie names an unexpired
 * session. Expiry is decided here, at read time.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::types::SessionResponse;
use crate::backend::auth::sessions::SESSION_COOKIE_NAME;
use crate::backend::auth::workflow::AuthWorkflow;
use crate::backend::error::BackendError;

/// Current session handler
///
/// # Errors
///
/// * `404 Not Found` - no cookie, unknown token, or expired session
pub async fn current_session(
    State(auth): State<AuthWorkflow>,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, BackendError> {
    let token = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string());
    let session = auth.current_session(token.as_deref()).await?;

    Ok(Json(SessionResponse {
        status: 200,
        message: "Session active".to_string(),
        expires_at: session.expires_at,
    }))
}
