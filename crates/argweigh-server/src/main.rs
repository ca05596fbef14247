//! Binary entrypoint for the argweigh HTTP server.
//!
//! Configuration comes from environment variables, see
//! [`argweigh_server::config`]. Log verbosity follows `RUST_LOG`
//! (default `info`).

use tracing_subscriber::EnvFilter;

use argweigh_server::config::ServerConfig;
use argweigh_server::router::build_router;
use argweigh_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let service = config.build_service()?;
    let app = build_router(AppState::new(service));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("argweigh server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
