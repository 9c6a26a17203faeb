use axum::routing::get;
use axum::Router;

use crate::handlers::programs;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(programs::list))
        .route("/{id}", get(programs::get_by_id))
}
