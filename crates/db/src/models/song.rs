//! Catalogue song entity model.

use serde::Serialize;
use serenata_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `songs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    pub id: DbId,
    pub title: String,
    pub composer: Option<String>,
    pub genre: Option<String>,
    pub duration_sec: Option<i32>,
    pub is_featured: bool,
    pub created_at: Timestamp,
}
