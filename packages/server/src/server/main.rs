// Main entry point for the directory API server

use std::sync::Arc;

use anyhow::{Context, Result};
use directory_core::kernel::{connect_database, run_migrations, ServerDeps};
use directory_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,directory_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting group directory API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = connect_database(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;
    tracing::info!("Migrations complete");

    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN is not set; admin queries and mutations are disabled");
    }
    if !config.enrichment_enabled {
        tracing::info!("Invite page enrichment is disabled");
    }

    // Build application
    let server_deps = Arc::new(ServerDeps::from_config(pool, &config)?);
    let app = build_app(
        server_deps,
        config.admin_api_token.clone(),
        config.allowed_origins.clone(),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
