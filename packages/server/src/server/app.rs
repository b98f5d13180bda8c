//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{admin_auth_middleware, AdminAuth};
use crate::server::routes::{
    graphql_batch_handler, graphql_handler, graphql_playground, health_handler, join_handler,
};

/// Upper bound for a whole request, enrichment included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Populated by admin_auth_middleware
    let auth = request
        .extensions()
        .get::<AdminAuth>()
        .copied()
        .unwrap_or_default();

    let context = GraphQLContext::new(state.server_deps.clone(), auth.is_admin);
    request.extensions_mut().insert(context);

    next.run(request).await
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // No configured origins means development: allow any
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(
    server_deps: Arc<ServerDeps>,
    admin_api_token: Option<String>,
    allowed_origins: Vec<String>,
) -> Router {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    let app_state = AxumAppState { server_deps };
    let admin_token = admin_api_token.map(Arc::new);

    let mut router = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    router
        .route("/health", get(health_handler))
        .route("/join/:invite_code", get(join_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(middleware::from_fn(move |req, next| {
            admin_auth_middleware(admin_token.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(cors_layer(&allowed_origins)),
        )
        .with_state(schema)
}
