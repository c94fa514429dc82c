//! Cookie Auth - Main Library
//!
//! A small HTTP backend for username/password authentication with
//! server-side sessions delivered as `HttpOnly` cookies.
//!
//! # Overview
//!
//! - Registration with unique name and mail, enforced by the database
//! - Login by name or mail, with optional 30-day "stay logged in"
//! - Logout revoking exactly the session behind the request's cookie
//! - Salted bcrypt password hashes computed off the async runtime
//! - Generic endpoints to read, set, edit and delete cookies
//!
//! # Usage
//!
//! ```rust,no_run
//! use cookie_auth::backend::server::{build_state, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let state = build_state(&config).await?;
//! let app = create_app(state, &config)?;
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! See [`backend`] for the module layout.

/// Backend server-side code
pub mod backend;
