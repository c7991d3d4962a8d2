//! Gender CRUD API
//!
//! A small REST service to list, create, fetch, update and soft-delete
//! gender records stored in PostgreSQL.
//!
//! Records are never physically removed: `DELETE /genders/{id}` only clears
//! the `isActive` flag, the listing hides inactive rows, and fetching by id
//! still returns them.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::db::PgGenderRepository;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Gender CRUD API...");

    // Load configuration
    let settings = Settings::load()?;
    info!(
        "📋 Configuration loaded (database: {}@{}:{}/{})",
        settings.database.user,
        settings.database.host,
        settings.database.port,
        settings.database.database
    );

    // Initialize database pool
    let pool = db::create_pool(&settings.database)?;
    if let Err(e) = db::verify_connection(&pool).await {
        error!("❌ FATAL: Failed to reach the database: {}", e);
        error!("Check DATABASE_URL or DB_HOST/DB_USER/DB_PASSWORD/DB_NAME");
        return Err(e.into());
    }

    // Create the table if it doesn't exist
    db::ensure_schema(&pool).await?;

    let state = Arc::new(AppState::new(Arc::new(PgGenderRepository::new(pool))));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("📚 API Endpoints:");
    info!("   GET    /genders       - List active genders");
    info!("   POST   /genders       - Create a new gender");
    info!("   GET    /genders/{{id}}  - Fetch a gender");
    info!("   PUT    /genders/{{id}}  - Update a gender");
    info!("   DELETE /genders/{{id}}  - Soft delete a gender");
    info!("   GET    /swagger.json  - OpenAPI document");
    info!("   GET    /swagger-ui/   - Swagger UI");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gender_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
