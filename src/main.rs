use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stringlens::construct::Database;
use stringlens::server;
use stringlens::settings::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .init();

    let mode = settings.persistence_mode();
    info!(?mode, "opening database");
    let database = Arc::new(Database::new(mode)?);
    let app = server::router(database, settings.filters);

    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    info!(address = %listener.local_addr()?, "Server is running");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
