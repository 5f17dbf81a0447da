use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia_api::{build_router, db, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting trivia api server...");

    let config = Config::from_env()?;

    // Create database connection pool
    let pool = db::connect(&config.database_url).await?;
    db::init_schema(&pool).await?;

    tracing::info!("Database connection established.");

    let addr = config.socket_addr();
    let app = build_router(AppState::new(pool, &config));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
