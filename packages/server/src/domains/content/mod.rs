//! Editorial content: static pages and the blog.

pub mod actions;
pub mod data;
pub mod models;

pub use data::{BlogPostData, PageData};
pub use models::{BlogPost, Page};
