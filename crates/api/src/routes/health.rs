use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use serenata_db::repositories::SongRepo;

use crate::state::AppState;

/// Readiness snapshot for the booking service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Seeded catalogue size; 0 means the song browser would come up empty.
    pub catalogue_songs: i64,
    /// Whether operator emails are configured (SMTP env present).
    pub notifier_configured: bool,
}

/// GET /health -- database, catalogue and notifier readiness.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // The catalogue count doubles as the connectivity probe.
    let catalogue_songs = SongRepo::count(&state.pool).await.ok();
    let db_healthy = catalogue_songs.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalogue_songs: catalogue_songs.unwrap_or(0),
        notifier_configured: state.notifier.is_some(),
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
