//! Route definitions for wedding date availability.
//!
//! Mounted at `/calendar` by `api_routes()`.
//!
//! ```text
//! GET    /                               busy_dates (?from, ?to)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Availability calendar routes — mounted at `/calendar`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(calendar::busy_dates))
}
