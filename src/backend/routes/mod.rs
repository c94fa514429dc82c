//! Route Configuration Module
//!
//! - **`router`** - Main router creation, CORS and tracing layers
//! - **`api_routes`** - Authentication and cookie endpoints

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::{cors_layer, create_router};
