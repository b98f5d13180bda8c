pub mod types;

pub use types::{BlogPostData, BlogPostInput, PageData, PageInput};
