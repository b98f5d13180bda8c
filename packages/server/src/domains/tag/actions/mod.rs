pub mod maintenance;
pub mod normalize;

pub use maintenance::{delete_tag, delete_unused_tags, recompute_tag_usage_counts};
pub use normalize::{parse_tag_names, resolve_tags};
