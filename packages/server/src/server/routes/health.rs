use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::domains::listings::models::Listing;
use crate::server::app::AxumAppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: DatabaseHealth,
    connection_pool: ConnectionPoolHealth,
    /// Moderation backlog, omitted when the database is down
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_listings: Option<i64>,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct ConnectionPoolHealth {
    size: u32,
    idle_connections: usize,
    max_connections: u32,
}

async fn check_database(pool: &SqlitePool) -> DatabaseHealth {
    match tokio::time::timeout(DB_CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(Ok(_)) => DatabaseHealth {
            status: "ok",
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error",
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error",
            error: Some(format!("Query timeout (>{}s)", DB_CHECK_TIMEOUT.as_secs())),
        },
    }
}

/// Health check endpoint
///
/// 200 when SQLite answers within the timeout, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let pool = &state.server_deps.db_pool;
    let database = check_database(pool).await;
    let is_healthy = database.status == "ok";

    let pending_listings = if is_healthy {
        Listing::stats(pool).await.ok().map(|stats| stats.pending)
    } else {
        None
    };

    let connection_pool = ConnectionPoolHealth {
        size: pool.size(),
        idle_connections: pool.num_idle(),
        max_connections: pool.options().get_max_connections(),
    };

    let (status_code, status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            connection_pool,
            pending_listings,
        }),
    )
}
