/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (authentication, cookies)
 * 3. Fallback handler (JSON 404)
 *
 * # Layers
 *
 * CORS is restricted to the configured origins with credentials allowed,
 * so browsers send and accept cookies cross-origin. Request spans come
 * from `TraceLayer`.
 */

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::health::health_check;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state with the stores and cookie policy
/// * `cors` - CORS layer, usually from [`cors_layer`]
pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router<()> {
    let router = Router::new().route("/api/health", axum::routing::get(health_check));

    // Add API routes
    let router = configure_api_routes(router);

    // Unknown routes get the same JSON envelope as handler errors
    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// CORS layer for credentialed requests from the configured origins
///
/// Wildcards are not allowed together with credentials, so methods and
/// headers mirror the preflight request instead.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "CORS_ALLOWED_ORIGINS",
                    value: origin.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_cors_layer_rejects_unparsable_origin() {
        let mut config = ServerConfig::default();
        config.cors_origins = vec!["http://ok.test".to_string(), "bad\norigin".to_string()];
        assert_matches!(
            cors_layer(&config),
            Err(ConfigError::InvalidValue { key: "CORS_ALLOWED_ORIGINS", .. })
        );
    }

    #[test]
    fn test_cors_layer_accepts_defaults() {
        assert!(cors_layer(&ServerConfig::default()).is_ok());
    }
}
