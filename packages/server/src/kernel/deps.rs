//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! resolver and CLI command. External services sit behind `Base*` traits.

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::kernel::{BasePageFetcher, HttpPageFetcher};

/// Knobs for the best-effort invite page scrape.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: SqlitePool,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    pub enrichment: EnrichmentConfig,
}

impl ServerDeps {
    pub fn new(
        db_pool: SqlitePool,
        page_fetcher: Arc<dyn BasePageFetcher>,
        enrichment: EnrichmentConfig,
    ) -> Self {
        Self {
            db_pool,
            page_fetcher,
            enrichment,
        }
    }

    /// Production wiring: real HTTP fetcher, enrichment settings from config.
    pub fn from_config(db_pool: SqlitePool, config: &Config) -> Result<Self> {
        Ok(Self::new(
            db_pool,
            Arc::new(HttpPageFetcher::new()?),
            EnrichmentConfig {
                enabled: config.enrichment_enabled,
                timeout: Duration::from_secs(config.enrichment_timeout_secs),
            },
        ))
    }
}
