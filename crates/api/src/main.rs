use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use screencamp_core::prediction::ScorerPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use screencamp_api::config::ServerConfig;
use screencamp_api::router::build_app_router;
use screencamp_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    // --- Database ---
    let pool = screencamp_db::connect_with_retry(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_retry_interval_secs),
    )
    .await;

    screencamp_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Scorer ---
    let scorer = ScorerPool::new(
        config.prediction.command(),
        config.prediction.max_concurrent,
        Duration::from_secs(config.prediction.timeout_secs),
    );
    tracing::info!(
        interpreter = %config.prediction.interpreter,
        script = %config.prediction.script.display(),
        max_concurrent = scorer.max_concurrent(),
        timeout_secs = config.prediction.timeout_secs,
        "Scorer configured"
    );

    // --- App state + router ---
    let state = AppState {
        pool: pool.clone(),
        scorer,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Server shut down");
    Ok(())
}

/// `LOG_FORMAT=json` switches to JSON lines; otherwise human-readable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "screencamp_api=debug,screencamp_core=debug,screencamp_db=info,tower_http=debug".into()
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
