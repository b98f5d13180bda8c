use juniper::{FieldError, FieldResult};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::kernel::ServerDeps;
use crate::server::graphql::errors::error_with_code;

/// GraphQL request context
///
/// Built per request by the auth middleware. Shared resources live in
/// `ServerDeps`; `is_admin` reflects the bearer token on this request.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: SqlitePool,
    pub server_deps: Arc<ServerDeps>,
    pub is_admin: bool,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(server_deps: Arc<ServerDeps>, is_admin: bool) -> Self {
        Self {
            db_pool: server_deps.db_pool.clone(),
            server_deps,
            is_admin,
        }
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.server_deps
    }

    pub fn require_admin(&self) -> FieldResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(forbidden())
        }
    }
}

fn forbidden() -> FieldError {
    error_with_code("Admin access required", "FORBIDDEN", None)
}
