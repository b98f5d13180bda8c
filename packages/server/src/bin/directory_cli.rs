//! Maintenance CLI for the directory database.
//!
//! Each command prints one JSON line describing its outcome.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directory_core::config::Config;
use directory_core::domains::tag::actions as tag_actions;
use directory_core::domains::taxonomy::actions as taxonomy_actions;
use directory_core::kernel::{connect_database, run_migrations};

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Database maintenance for the group directory")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Insert the default categories, countries and languages
    Seed,

    /// Refresh every tag's approved-listing count
    RecomputeTagCounts,

    /// Delete tags no listing uses
    CleanupTags,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seeded: Option<SeedCounts>,
}

#[derive(Serialize)]
struct SeedCounts {
    categories: i32,
    countries: i32,
    languages: i32,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,directory_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let pool = get_pool(cli.database_url).await?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&pool).await,
        Commands::Seed => cmd_seed(&pool).await,
        Commands::RecomputeTagCounts => cmd_recompute_tag_counts(&pool).await,
        Commands::CleanupTags => cmd_cleanup_tags(&pool).await,
    }
}

async fn get_pool(database_url: Option<String>) -> Result<SqlitePool> {
    let url = match database_url {
        Some(url) => url,
        None => Config::from_env()?.database_url,
    };
    connect_database(&url)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate(pool: &SqlitePool) -> Result<()> {
    run_migrations(pool).await?;
    output(&Response {
        success: true,
        command: "migrate",
        count: None,
        seeded: None,
    })
}

async fn cmd_seed(pool: &SqlitePool) -> Result<()> {
    run_migrations(pool).await?;
    let summary = taxonomy_actions::seed_taxonomy(pool)
        .await
        .context("Failed to seed taxonomy")?;

    output(&Response {
        success: true,
        command: "seed",
        count: None,
        seeded: Some(SeedCounts {
            categories: summary.categories_created,
            countries: summary.countries_created,
            languages: summary.languages_created,
        }),
    })
}

async fn cmd_recompute_tag_counts(pool: &SqlitePool) -> Result<()> {
    let updated = tag_actions::recompute_tag_usage_counts(pool)
        .await
        .context("Failed to recompute tag usage counts")?;

    output(&Response {
        success: true,
        command: "recompute-tag-counts",
        count: Some(updated),
        seeded: None,
    })
}

async fn cmd_cleanup_tags(pool: &SqlitePool) -> Result<()> {
    let deleted = tag_actions::delete_unused_tags(pool)
        .await
        .context("Failed to delete unused tags")?;

    output(&Response {
        success: true,
        command: "cleanup-tags",
        count: Some(deleted),
        seeded: None,
    })
}
