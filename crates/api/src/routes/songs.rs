//! Route definitions for the song catalogue.
//!
//! Mounted at `/songs` by `api_routes()`.
//!
//! ```text
//! GET    /                               list_songs (?q, featured)
//! GET    /{id}                           get_song
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::songs;
use crate::state::AppState;

/// Song catalogue routes — mounted at `/songs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(songs::list_songs))
        .route("/{id}", get(songs::get_song))
}
