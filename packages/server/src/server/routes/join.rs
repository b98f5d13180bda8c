use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, error};

use crate::domains::listings::models::{Listing, ListingStatus};
use crate::server::app::AxumAppState;

/// Short link: `/join/<invite code>` redirects to the group's invite link.
///
/// Only approved listings resolve; anything else is a 404.
pub async fn join_handler(
    Extension(state): Extension<AxumAppState>,
    Path(invite_code): Path<String>,
) -> Response {
    match Listing::find_by_invite_code(&invite_code, &state.server_deps.db_pool).await {
        Ok(Some(listing)) if listing.status == ListingStatus::Approved => {
            debug!(listing_id = %listing.id, "Join redirect");
            Redirect::temporary(&listing.invite_link).into_response()
        }
        Ok(_) => (StatusCode::NOT_FOUND, "Group not found").into_response(),
        Err(e) => {
            error!(error = %e, invite_code = %invite_code, "Join lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
