use mb_server::{AppState, build_router, logger};

use mb_live::LiveConfig;

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real environment variables win
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Ignoring unreadable .env file: {}", e);
    }

    // Load and validate configuration
    let config = mb_config::Config::load()?;
    config.validate()?;

    // Ensure log directory exists
    let log_file_path = config.log_file_path()?;
    if let Some(ref path) = log_file_path
        && let Some(log_dir) = path.parent()
    {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mb-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool and schema
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = mb_db::connect(&database_path).await?;
    info!("Database connection established");

    // Build application state
    let app_state = AppState::new(
        pool,
        LiveConfig::from(&config),
        Duration::from_secs(config.membership.sse_keep_alive_secs),
    );
    let coordinator = app_state.coordinator.clone();

    // Load stored rooms before accepting traffic
    match coordinator.warm_up().await {
        Ok(loaded) => info!("Loaded {} rooms into the capacity tracker", loaded),
        Err(e) => warn!("Room warm-up failed, rooms will load on first use: {}", e),
    }

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                // Live streams never finish on their own; end them first
                coordinator.shutdown().await;
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if shutdown_rx.wait_for(|stop| *stop).await.is_err() {
                warn!("Shutdown signal handler exited early");
                std::future::pending::<()>().await;
            }
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
