//! Authentication Module
//!
//! This module handles registration, login and logout with cookie-backed
//! sessions.
//!
//! # Architecture
//!
//! - **`password`** - Salted bcrypt hashing on a bounded blocking pool
//! - **`sessions`** - Session token generation and expiry policy
//! - **`workflow`** - Register / login / logout orchestration
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! Credentials and sessions themselves are persisted by
//! [`crate::backend::db`].
//!
//! # Authentication Flow
//!
//! 1. **Register**: mail, name, password → credential + 24h session → `session` cookie
//! 2. **Login**: name, password → verified → 24h or 30d session → `session` cookie
//! 3. **Logout**: `session` cookie → session row deleted → cookie cleared
//!
//! # Security
//!
//! - Passwords are stored as bcrypt hashes with a per-credential salt
//! - Hash comparison is constant-time
//! - Unknown names and wrong passwords are indistinguishable to the client
//! - Name and mail uniqueness is enforced by the database

/// Password hashing service
pub mod password;

/// Session issuer
pub mod sessions;

/// Authentication workflow
pub mod workflow;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{current_session, login, logout, register};
pub use password::PasswordHasher;
pub use sessions::SESSION_COOKIE_NAME;
pub use workflow::AuthWorkflow;
