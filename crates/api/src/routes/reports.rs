use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /registrations  -> export_registrations
/// GET /programs       -> program_counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registrations", get(reports::export_registrations))
        .route("/programs", get(reports::program_counts))
}
