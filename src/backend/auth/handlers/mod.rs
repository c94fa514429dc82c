//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Form bodies and response envelopes
//! ├── register.rs - POST /api/v1/authentication/register
//! ├── login.rs    - POST /api/v1/authentication/login
//! ├── logout.rs   - POST /api/v1/authentication/logout
//! └── session.rs  - GET  /api/v1/authentication/session
//! ```
//!
//! Every handler sets or clears the `session` cookie through the shared
//! `CookiePolicy`, so the session cookie carries the same `Secure` and
//! `SameSite` attributes as any other cookie the server writes.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Current session handler
pub mod session;

pub use types::{LoginRequest, RegisterRequest, SessionResponse, StatusResponse};

pub use login::login;
pub use logout::logout;
pub use register::register;
pub use session::current_session;
