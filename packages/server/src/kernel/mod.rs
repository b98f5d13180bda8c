//! Kernel module - server infrastructure and dependencies.

pub mod database;
pub mod deps;
pub mod http_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use database::{connect_database, connect_in_memory, run_migrations, MIGRATOR};
pub use deps::{EnrichmentConfig, ServerDeps};
pub use http_fetcher::HttpPageFetcher;
pub use test_dependencies::{MockPageFetcher, TestDependencies};
pub use traits::*;
