//! Route definitions for the public booking configurator.
//!
//! ```text
//! POST   /configure                      submit_booking
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::configure;
use crate::state::AppState;

/// Configurator routes — mounted at the `/api/v1` root.
pub fn router() -> Router<AppState> {
    Router::new().route("/configure", post(configure::submit_booking))
}
