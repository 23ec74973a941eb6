use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use menagerie_api::config::ServerConfig;
use menagerie_api::router::build_app_router;
use menagerie_api::state::AppState;
use menagerie_store::{PictureStore, Registry};
use menagerie_upstream::{HttpPictureFetcher, NinjaClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menagerie_api=debug,menagerie_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if config.ninja_api_key.is_empty() {
        tracing::warn!("NINJA_API_KEY is not set; taxonomy lookups will likely be rejected");
    }

    // --- Upstream clients ---
    let upstream_timeout = Duration::from_secs(config.upstream_timeout_secs);
    let lookup = NinjaClient::new(
        config.ninja_api_url.clone(),
        config.ninja_api_key.clone(),
        upstream_timeout,
    )
    .expect("Failed to build taxonomy HTTP client");
    let fetcher =
        HttpPictureFetcher::new(upstream_timeout).expect("Failed to build picture HTTP client");

    // --- Picture storage ---
    let pictures = PictureStore::new(config.pictures_dir.clone(), Arc::new(fetcher));
    pictures
        .ensure_dir()
        .await
        .expect("Failed to create pictures directory");
    tracing::info!(dir = %pictures.dir().display(), "Picture store ready");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::new(Registry::new()),
        lookup: Arc::new(lookup),
        pictures,
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
