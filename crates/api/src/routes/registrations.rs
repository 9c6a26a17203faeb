use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::registrations;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> register_programs
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(registrations::list).post(registrations::register_programs),
        )
        .route("/{id}", delete(registrations::delete))
}
