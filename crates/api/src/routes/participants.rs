//! Route definitions for the `/participants` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::participants;
use crate::state::AppState;

/// Routes mounted at `/participants`.
///
/// ```text
/// POST /                           -> issue_code
/// GET  /{id}                       -> get_by_id
/// GET  /code/{code}                -> lookup_by_code
/// PUT  /code/{code}/profile-image  -> update_profile_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(participants::issue_code))
        .route("/{id}", get(participants::get_by_id))
        .route("/code/{code}", get(participants::lookup_by_code))
        .route(
            "/code/{code}/profile-image",
            put(participants::update_profile_image),
        )
}
