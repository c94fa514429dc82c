/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/v1/authentication/register` - Create credential, set session cookie
 * - `POST /api/v1/authentication/login` - Verify credential, set session cookie
 * - `POST /api/v1/authentication/logout` - Revoke session, clear cookie
 * - `GET /api/v1/authentication/session` - Expiry of the current session
 *
 * ## Cookies
 * - `GET /api/v1/cookies/get_cookies` - Echo request cookies
 * - `POST /api/v1/cookies/set_cookie` - Set a cookie
 * - `POST /api/v1/cookies/edit_cookie` - Change value or expiry of a cookie
 * - `DELETE /api/v1/cookies/delete_cookie` - Clear a cookie
 */

use axum::routing::{delete, get, post};
use axum::Router;

use crate::backend::auth::{current_session, login, logout, register};
use crate::backend::cookies::{delete_cookie, edit_cookie, get_cookies, set_cookie};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/v1/authentication/register", post(register))
        .route("/api/v1/authentication/login", post(login))
        .route("/api/v1/authentication/logout", post(logout))
        .route("/api/v1/authentication/session", get(current_session))
        // Cookie endpoints
        .route("/api/v1/cookies/get_cookies", get(get_cookies))
        .route("/api/v1/cookies/set_cookie", post(set_cookie))
        .route("/api/v1/cookies/edit_cookie", post(edit_cookie))
        .route("/api/v1/cookies/delete_cookie", delete(delete_cookie))
}
