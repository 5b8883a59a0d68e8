pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::error::{ApiError, Result as ApiResult};
pub use api::auth::auth_user_dto::AuthUserDto;
pub use api::categories::{category_dto::CategoryDto, category_list_response::CategoryListResponse};
pub use api::extractors::identity::{CurrentIdentity, RequireIdentity};
pub use api::forum::{post_dto::PostDto, reply_dto::ReplyDto};
pub use api::progress::progress_dto::ProgressDto;

use crate::routes::build_router;
use crate::state::AppState;

use std::error::Error;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = mr_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = mr_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mr-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/mr-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    if config.auth.google().is_none() && config.auth.microsoft().is_none() {
        warn!("No OAuth providers configured - only local login is available");
    }

    // Build application state and router
    let app_state = AppState::from_config(&config, pool.clone());
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => warn!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    // Drain the pool before exit
    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
