/**
 * Register Handler
 *
 * POST /api/v1/authentication/register
 *
 * Creates a credential and logs the new user in straight away with a
 * 24-hour session.
 */

use axum::{extract::rejection::FormRejection, extract::State, response::Json, Form};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::types::{RegisterRequest, StatusResponse};
use crate::backend::auth::workflow::AuthWorkflow;
use crate::backend::cookies::CookiePolicy;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `409 Conflict` - name or mail already registered
/// * `400`/`415`/`422` - malformed form body
/// * `500 Internal Server Error` - hashing or database failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/authentication/register HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// mail=a%40x.com&name=alice&password=secret
/// ```
pub async fn register(
    State(auth): State<AuthWorkflow>,
    State(policy): State<CookiePolicy>,
    jar: CookieJar,
    form: Result<Form<RegisterRequest>, FormRejection>,
) -> Result<(CookieJar, Json<StatusResponse>), BackendError> {
    let Form(request) = form?;
    tracing::info!("Register request for name: {}", request.name);

    let session = auth
        .register(&request.mail, &request.name, &request.password)
        .await?;

    let jar = jar.add(policy.session_cookie(&session, false)?);
    Ok((jar, Json(StatusResponse::ok())))
}
