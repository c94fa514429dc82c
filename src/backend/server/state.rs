/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container, holding:
 * - The SQLite-backed credential and session stores
 * - The authentication workflow (stores + password hasher)
 * - The cookie policy applied to every `Set-Cookie`
 * - The server boot time, for health reporting
 *
 * Every field is cheap to clone: the pool and the hasher's worker
 * semaphore are reference-counted internally.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use cookie_auth::backend::auth::AuthWorkflow;
 *
 * async fn handler(State(auth): State<AuthWorkflow>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use chrono::{DateTime, Utc};

use crate::backend::auth::AuthWorkflow;
use crate::backend::cookies::CookiePolicy;
use crate::backend::db::Database;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential and session stores
    pub db: Database,

    /// Register / login / logout orchestration
    pub auth: AuthWorkflow,

    /// Attributes for every cookie the server sets
    pub cookie_policy: CookiePolicy,

    /// When the server finished booting
    pub boot_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: Database, auth: AuthWorkflow, cookie_policy: CookiePolicy) -> Self {
        Self {
            db,
            auth,
            cookie_policy,
            boot_time: Utc::now(),
        }
    }

    /// Whole seconds since boot
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.boot_time).num_seconds().max(0)
    }
}

impl FromRef<AppState> for AuthWorkflow {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for CookiePolicy {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.cookie_policy
    }
}
