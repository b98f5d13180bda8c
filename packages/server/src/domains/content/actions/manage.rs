//! Admin CRUD for pages and blog posts.
//!
//! Slugs are probed for uniqueness and regenerated when the title changes.

use sqlx::SqlitePool;
use tracing::info;

use crate::common::utils::{unique_slug, SlugScope};
use crate::common::{BlogPostId, DirectoryError, DirectoryResult, PageId};
use crate::domains::content::data::{BlogPostInput, PageInput};
use crate::domains::content::models::{BlogPost, Page};

pub async fn create_page(input: &PageInput, pool: &SqlitePool) -> DirectoryResult<Page> {
    let draft = input.validate()?;
    let mut tx = pool.begin().await?;

    let slug = unique_slug(&mut tx, SlugScope::Pages, &draft.title, None).await?;
    let page = Page::create(&draft, &slug, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "page", &slug))?;

    tx.commit().await?;
    info!(page_id = %page.id, slug = %page.slug, "Created page");
    Ok(page)
}

pub async fn update_page(
    id: PageId,
    input: &PageInput,
    pool: &SqlitePool,
) -> DirectoryResult<Page> {
    let draft = input.validate()?;
    let existing = Page::find_by_id(id, pool)
        .await?
        .ok_or_else(|| DirectoryError::not_found("page", id))?;

    let mut tx = pool.begin().await?;
    let slug = if draft.title != existing.title {
        unique_slug(&mut tx, SlugScope::Pages, &draft.title, Some(id.into_uuid())).await?
    } else {
        existing.slug
    };

    let page = Page::update(id, &draft, &slug, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "page", &slug))?
        .ok_or_else(|| DirectoryError::not_found("page", id))?;

    tx.commit().await?;
    info!(page_id = %id, slug = %page.slug, "Updated page");
    Ok(page)
}

pub async fn delete_page(id: PageId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut conn = pool.acquire().await?;
    if !Page::delete(id, &mut conn).await? {
        return Err(DirectoryError::not_found("page", id));
    }
    info!(page_id = %id, "Deleted page");
    Ok(())
}

pub async fn create_blog_post(
    input: &BlogPostInput,
    pool: &SqlitePool,
) -> DirectoryResult<BlogPost> {
    let draft = input.validate()?;
    let mut tx = pool.begin().await?;

    let slug = unique_slug(&mut tx, SlugScope::BlogPosts, &draft.title, None).await?;
    let post = BlogPost::create(&draft, &slug, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "blog post", &slug))?;

    tx.commit().await?;
    info!(post_id = %post.id, slug = %post.slug, "Created blog post");
    Ok(post)
}

pub async fn update_blog_post(
    id: BlogPostId,
    input: &BlogPostInput,
    pool: &SqlitePool,
) -> DirectoryResult<BlogPost> {
    let draft = input.validate()?;
    let existing = BlogPost::find_by_id(id, pool)
        .await?
        .ok_or_else(|| DirectoryError::not_found("blog post", id))?;

    let mut tx = pool.begin().await?;
    let slug = if draft.title != existing.title {
        unique_slug(&mut tx, SlugScope::BlogPosts, &draft.title, Some(id.into_uuid())).await?
    } else {
        existing.slug
    };

    let post = BlogPost::update(id, &draft, &slug, &mut tx)
        .await
        .map_err(|e| DirectoryError::from_insert(e, "blog post", &slug))?
        .ok_or_else(|| DirectoryError::not_found("blog post", id))?;

    tx.commit().await?;
    info!(post_id = %id, slug = %post.slug, "Updated blog post");
    Ok(post)
}

pub async fn delete_blog_post(id: BlogPostId, pool: &SqlitePool) -> DirectoryResult<()> {
    let mut conn = pool.acquire().await?;
    if !BlogPost::delete(id, &mut conn).await? {
        return Err(DirectoryError::not_found("blog post", id));
    }
    info!(post_id = %id, "Deleted blog post");
    Ok(())
}
