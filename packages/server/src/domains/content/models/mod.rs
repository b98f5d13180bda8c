pub mod blog_post;
pub mod page;

pub use blog_post::{BlogPost, BlogPostDraft};
pub use page::{Page, PageDraft};
