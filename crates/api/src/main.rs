use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripsync_api::config::ServerConfig;
use tripsync_api::router::build_app_router;
use tripsync_api::state::AppState;
use tripsync_events::{DbNotificationSink, EventBus, EventPersistence, ResultNotifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tripsync_api=debug,tripsync_events=debug,tripsync_db=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = tripsync_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

    tripsync_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    tripsync_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let persistence_handle = tokio::spawn(EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // --- Notifier ---
    let notifier = Arc::new(ResultNotifier::new(
        Arc::new(DbNotificationSink::new(pool.clone())),
        config.notify_retry_policy(),
        config.frontend_url.clone(),
    ));
    tracing::info!("Event services started (persistence, notifier)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        notifier: Arc::clone(&notifier),
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
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    if notifier.shutdown(grace).await {
        tracing::info!("Pending notifications delivered");
    } else {
        tracing::warn!("Shutdown grace period expired with notifications still in flight");
    }

    // Dropping the last sender closes the channel and stops persistence.
    drop(event_bus);
    let _ = tokio::time::timeout(grace, persistence_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
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
