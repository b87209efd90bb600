use kp_server::{AppState, build_router, logger};

use std::error::Error;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real config comes from config.toml + KP_* vars
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = kp_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = kp_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting kp-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool and run migrations
    let db_path = config.database_path()?;
    let pool = kp_db::connect(&db_path, config.database.max_connections).await?;
    info!("Database ready at {}", db_path.display());

    let state = AppState::new(pool, &config.auth);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
