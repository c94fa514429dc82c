/**
 * Cookie Auth Server Entry Point
 *
 * Loads `.env`, initializes tracing, builds the app from the environment
 * and serves it until Ctrl-C. The database pool is closed after the last
 * in-flight request has finished.
 */

use cookie_auth::backend::server::{build_state, create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // RUST_LOG wins; default to info
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Server initialization started");

    let config = ServerConfig::from_env()?;
    let state = build_state(&config).await?;
    let db = state.db.clone();
    let app = create_app(state, &config)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
