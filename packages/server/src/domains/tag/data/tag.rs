use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::common::utils::graphql_int;
use crate::domains::tag::models::Tag;

/// Tag GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A free-text label attached to listings")]
pub struct TagData {
    pub id: String,
    pub name: String,
    pub slug: String,

    /// Approved listings carrying this tag, as of the last recount
    pub usage_count: i32,

    pub created_at: DateTime<Utc>,
}

impl From<Tag> for TagData {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name,
            slug: tag.slug,
            usage_count: graphql_int(tag.usage_count),
            created_at: tag.created_at,
        }
    }
}
