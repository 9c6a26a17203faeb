pub mod health;
pub mod participants;
pub mod programs;
pub mod registrations;
pub mod reports;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /teams                                   list
/// /teams/{id}                              get
///
/// /programs                                list (?program_type=&participation_type=)
/// /programs/{id}                           get
///
/// /participants                            issue code (POST)
/// /participants/{id}                       get with team
/// /participants/code/{code}                lookup by code
/// /participants/code/{code}/profile-image  update image (PUT)
///
/// /registrations                           register programs (POST), list (?participant_id=)
/// /registrations/{id}                      delete
///
/// /reports/registrations                   export (?format=json|csv&participant_id=&program_id=)
/// /reports/programs                        registration counts per program
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/teams", teams::router())
        .nest("/programs", programs::router())
        .nest("/participants", participants::router())
        .nest("/registrations", registrations::router())
        .nest("/reports", reports::router())
}
