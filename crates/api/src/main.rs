use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use intake_core::clock::SystemClock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_api::bootstrap::{ensure_admin, AdminBootstrap};
use intake_api::config::ServerConfig;
use intake_api::router::build_app_router;
use intake_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = intake_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    intake_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    intake_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Bootstrap admin ---
    if let Some(admin) = AdminBootstrap::from_env() {
        ensure_admin(&pool, &admin)
            .await
            .expect("Failed to bootstrap admin account");
    }

    // --- Media storage ---
    let media = intake_media::build_storage(&config.media);
    tracing::info!(backend = media.backend_name(), "Media storage configured");

    // --- Event bus ---
    let event_bus = Arc::new(intake_events::EventBus::default());

    // Spawn log persistence (writes all events to application_logs).
    let persistence_handle = tokio::spawn(intake_events::LogPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));
    tracing::info!("Application log persistence started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: Arc::new(SystemClock),
        event_bus: Arc::clone(&event_bus),
        media,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last bus sender closes the channel and stops persistence.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), persistence_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
