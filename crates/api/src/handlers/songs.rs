//! Handlers for the public song catalogue.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use serenata_core::error::CoreError;
use serenata_core::types::DbId;
use serenata_db::repositories::SongRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Filter parameters for listing songs.
#[derive(Debug, Deserialize)]
pub struct ListSongsParams {
    /// Case-insensitive title/composer substring.
    pub q: Option<String>,
    pub featured: Option<bool>,
}

/// GET /songs — list catalogue songs, featured first.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListSongsParams>,
) -> AppResult<impl IntoResponse> {
    let songs = SongRepo::list(&state.pool, params.q.as_deref(), params.featured).await?;
    Ok(DataResponse::new(songs))
}

/// GET /songs/{id} — a single catalogue song.
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let song = SongRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Song", id }))?;
    Ok(DataResponse::new(song))
}
