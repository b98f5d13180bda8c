pub mod enrichment;

pub use enrichment::{enrich, parse_metadata, EnrichmentFailure, GroupMetadata};
