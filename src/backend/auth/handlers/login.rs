/**
 * Login Handler
 *
 * POST /api/v1/authentication/login
 *
 * # Security
 *
 * - Unknown names and wrong passwords get the same 404 payload
 * - Password comparison is constant-time
 * - Passwords are never logged or returned
 */

use axum::{extract::rejection::FormRejection, extract::State, response::Json, Form};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::types::{LoginRequest, StatusResponse};
use crate::backend::auth::workflow::AuthWorkflow;
use crate::backend::cookies::CookiePolicy;
use crate::backend::error::BackendError;

/// Login handler
///
/// With `stay_logged_in` the session lasts 30 days and the cookie carries a
/// matching `Expires`. Without it the session lasts 24 hours and the cookie
/// is dropped when the browser closes.
///
/// # Errors
///
/// * `404 Not Found` - invalid credentials
/// * `400`/`415`/`422` - malformed form body
/// * `500 Internal Server Error` - hashing or database failure
pub async fn login(
    State(auth): State<AuthWorkflow>,
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<(CookieJar, Json<StatusResponse>), BackendError> {
    let Form(request) = form?;
    tracing::info!("Login request for: {}", request.name);

    let session = auth
        .login(&request.name, &request.password, request.stay_logged_in)
        .await?;

    let jar = jar.add(policy.session_cookie(&session, request.stay_logged_in)?);
    Ok((jar, Json(StatusResponse::ok())))
}
