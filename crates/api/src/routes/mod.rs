pub mod bookings;
pub mod calendar;
pub mod configure;
pub mod health;
pub mod songs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /configure                              submit a completed booking draft (POST)
///
/// /songs                                  list catalogue songs (?q, featured)
///
/// /calendar                               busy wedding dates (?from, ?to)
///
/// /admin/bookings                         list bookings (?include_hidden, state, limit, offset)
/// /admin/bookings/{id}                    booking detail with client and selections
/// /admin/bookings/{id}/transition         move the lead along the pipeline (POST)
/// /admin/bookings/{id}/final-price        attach negotiated price (PUT)
/// /admin/bookings/{id}/visibility         hide/show in default listings (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(configure::router())
        .nest("/songs", songs::router())
        .nest("/calendar", calendar::router())
        .nest("/admin/bookings", bookings::router())
}
