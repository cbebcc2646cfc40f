use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use suntyn_tools::{api::create_router, application::builder::ApplicationBuilder, catalog, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with structured logging; RUST_LOG overrides the default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Suntyn tools service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!(
        uploads_dir = ?config.uploads_dir,
        max_file_size_bytes = config.max_file_size_bytes,
        max_request_size_bytes = config.max_request_size_bytes,
        "Configuration loaded and validated"
    );

    let listen_addr = config.listen_addr.clone();
    let app = ApplicationBuilder::new(config)
        .with_storage()
        .await?
        .with_persistence()
        .with_security()
        .build()?;

    // Start upload sweeper in background
    tokio::spawn(Arc::clone(&app.sweeper).run());
    info!("Upload sweeper started");

    let router = create_router(app.state);

    info!(tools = catalog::all().len(), "Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
