//! Cookie Module
//!
//! The cookie attribute policy shared by every endpoint, and the generic
//! cookie-management endpoints.
//!
//! # Module Structure
//!
//! ```text
//! cookies/
//! ├── mod.rs      - Module exports
//! ├── policy.rs   - CookiePolicy (HttpOnly, Secure, SameSite, Path)
//! ├── types.rs    - Request bodies and response envelope
//! └── handlers.rs - get/set/edit/delete handlers
//! ```

pub mod policy;
pub mod types;
pub mod handlers;

pub use policy::{parse_same_site, CookiePolicy};
pub use handlers::{delete_cookie, edit_cookie, get_cookies, set_cookie};
