use route_asset_backend::{config::AppConfig, server, AppState};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,route_asset_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    if let Some(dir) = config.sqlite_dir() {
        std::fs::create_dir_all(&dir).expect("Failed to create database directory");
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database.");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(db);

    if let Err(e) = server::run_server(config, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
