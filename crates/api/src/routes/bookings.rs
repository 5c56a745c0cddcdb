//! Route definitions for the admin booking pipeline.
//!
//! Mounted at `/admin/bookings` by `api_routes()`.
//!
//! ```text
//! GET    /                               list_bookings (?include_hidden, state, limit, offset)
//! GET    /{id}                           get_booking
//! POST   /{id}/transition                transition_booking
//! PUT    /{id}/final-price               set_final_price
//! PUT    /{id}/visibility                set_visibility
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Admin booking routes — mounted at `/admin/bookings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list_bookings))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/transition", post(bookings::transition_booking))
        .route("/{id}/final-price", put(bookings::set_final_price))
        .route("/{id}/visibility", put(bookings::set_visibility))
}
