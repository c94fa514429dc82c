//! Backend Error Module
//!
//! Error types for the HTTP layer and their conversion into responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
