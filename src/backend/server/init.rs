/**
 * Server Initialization
 *
 * Builds the application state from a validated `ServerConfig` and wires
 * it into the router.
 *
 * # Initialization Process
 *
 * 1. Open the database (creating the file and running migrations)
 * 2. Start the password hasher's worker pool
 * 3. Assemble `AppState`
 * 4. Create the router with CORS and tracing layers
 *
 * Any failure aborts startup; there is no degraded mode without a database.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::{AuthWorkflow, PasswordHasher};
use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::backend::routes::router::{cors_layer, create_router};
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hasher error: {0}")]
    Hasher(#[from] BackendError),
}

/// Open the stores and assemble the application state
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let db = Database::init(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let hasher = PasswordHasher::new(config.bcrypt_cost, config.hash_workers)?;
    tracing::info!(
        "Password hasher ready (cost {}, {} workers)",
        config.bcrypt_cost,
        config.hash_workers
    );

    let auth = AuthWorkflow::new(db.clone(), hasher);
    Ok(AppState::new(db, auth, config.cookie_policy()))
}

/// Create and configure the Axum application
pub fn create_app(app_state: AppState, config: &ServerConfig) -> Result<Router<()>, StartupError> {
    let cors = cors_layer(config)?;
    let app = create_router(app_state, cors);
    tracing::info!("Router configured");
    Ok(app)
}
