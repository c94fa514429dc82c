//! Backend Module
//!
//! All server-side code: an Axum HTTP server that registers credentials,
//! logs users in and out with cookie-backed sessions, and exposes a few
//! generic cookie endpoints.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly, CORS and tracing layers
//! - **`auth`** - Password hashing, session issuing, auth workflow and handlers
//! - **`cookies`** - Cookie policy and the generic cookie endpoints
//! - **`db`** - SQLite credential and session stores
//! - **`error`** - `BackendError` and its HTTP mapping
//! - **`health`** - Liveness endpoint
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── cookies/        - Cookie endpoints
//! ├── db/             - Persistence
//! ├── error/          - Error types
//! └── health.rs       - Health check
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Client errors carry their own
//! message; database and hashing failures are logged and reported as a
//! generic 500.
//!
//! # Example
//!
//! ```rust,no_run
//! use cookie_auth::backend::server::{build_state, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let state = build_state(&config).await?;
//! let app = create_app(state, &config)?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and session management
pub mod auth;

/// Generic cookie endpoints
pub mod cookies;

/// Credential and session persistence
pub mod db;

/// Backend error types
pub mod error;

/// Health check
pub mod health;

pub use error::BackendError;
pub use server::{build_state, create_app, AppState, ServerConfig};
