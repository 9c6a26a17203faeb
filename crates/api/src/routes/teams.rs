use axum::routing::get;
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list))
        .route("/{id}", get(teams::get_by_id))
}
