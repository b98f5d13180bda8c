use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};

use crate::common::utils::validation::{optional_text, optional_url, required_text};
use crate::common::DirectoryResult;
use crate::domains::content::models::{BlogPost, BlogPostDraft, Page, PageDraft};

const CONTENT_MAX_LEN: usize = 100_000;

#[derive(Debug, Clone, GraphQLObject)]
pub struct PageData {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Page> for PageData {
    fn from(page: Page) -> Self {
        Self {
            id: page.id.to_string(),
            title: page.title,
            slug: page.slug,
            content: page.content,
            meta_title: page.meta_title,
            meta_description: page.meta_description,
            is_published: page.is_published,
            created_at: page.created_at,
            updated_at: page.updated_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct BlogPostData {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostData {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            meta_title: post.meta_title,
            meta_description: post.meta_description,
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Create/update form for pages. `isPublished` defaults to true.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct PageInput {
    pub title: String,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
}

impl PageInput {
    pub fn validate(&self) -> DirectoryResult<PageDraft> {
        Ok(PageDraft {
            title: required_text("title", &self.title, 2, 200)?,
            content: optional_text("content", self.content.as_deref(), CONTENT_MAX_LEN)?,
            meta_title: optional_text("meta_title", self.meta_title.as_deref(), 200)?,
            meta_description: optional_text(
                "meta_description",
                self.meta_description.as_deref(),
                300,
            )?,
            is_published: self.is_published.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct BlogPostInput {
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
}

impl BlogPostInput {
    pub fn validate(&self) -> DirectoryResult<BlogPostDraft> {
        Ok(BlogPostDraft {
            title: required_text("title", &self.title, 2, 200)?,
            content: optional_text("content", self.content.as_deref(), CONTENT_MAX_LEN)?,
            excerpt: optional_text("excerpt", self.excerpt.as_deref(), 300)?,
            featured_image: optional_url("featured_image", self.featured_image.as_deref())?,
            meta_title: optional_text("meta_title", self.meta_title.as_deref(), 200)?,
            meta_description: optional_text(
                "meta_description",
                self.meta_description.as_deref(),
                300,
            )?,
            is_published: self.is_published.unwrap_or(true),
        })
    }
}
