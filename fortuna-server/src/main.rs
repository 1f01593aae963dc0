use std::sync::Arc;
use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use fortuna_server::{build_sqlite_url, config::load_config, connect_pool, routes, run_migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env è facoltativo
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // senza JWT_SECRET ci si ferma qui
    let config = load_config()?;

    let db_url = build_sqlite_url(&config.database_url).context("build sqlite DATABASE_URL")?;
    info!("Using DATABASE_URL = {}", db_url);
    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;

    let state = Arc::new(AppState::new(pool, &config.jwt_secret));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
