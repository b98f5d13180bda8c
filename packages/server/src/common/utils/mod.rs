pub mod count;
pub mod slug;
pub mod text;
pub mod validation;

pub use count::graphql_int;
pub use slug::{slugify, unique_slug, SlugScope};
pub use text::truncate_text;
