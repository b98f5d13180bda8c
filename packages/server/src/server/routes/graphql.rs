use crate::server::graphql::{GraphQLContext, Schema};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use juniper::http::{graphiql::graphiql_source, GraphQLBatchRequest, GraphQLRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Request-level failures (parse errors, unknown fields) are a 400; resolver
/// errors still come back as 200 with an `errors` array.
fn graphql_response<T: Serialize>(is_ok: bool, body: T) -> Response {
    let status = if is_ok {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body)).into_response()
}

/// GraphQL POST endpoint
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    debug!(admin = context.is_admin, "GraphQL request");
    let response = request.execute(&schema, &context).await;
    graphql_response(response.is_ok(), response)
}

/// Several operations in one POST, answered in order
pub async fn graphql_batch_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    let response = batch.execute(&schema, &context).await;
    graphql_response(response.is_ok(), response)
}

/// GraphiQL pointed at `/graphql` (debug builds only)
pub async fn graphql_playground() -> Html<String> {
    Html(graphiql_source("/graphql", None))
}
