//! Server Module
//!
//! Everything needed to turn configuration into a running Axum app.
//!
//! - **`config`** - Environment-driven `ServerConfig` and validation
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`init`** - State construction and app creation

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app, StartupError};
pub use state::AppState;
