//! Song selection entity model and DTOs.

use serde::{Deserialize, Serialize};
use serenata_core::types::DbId;
use sqlx::FromRow;

/// A row from the `selections` table.
///
/// Either `song_id` (catalogue song) or `custom_title` (custom song) is
/// set. `moment` tags the ceremony moment the song was chosen for; it is
/// null for free-standing custom songs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Selection {
    pub id: DbId,
    pub booking_id: DbId,
    pub song_id: Option<DbId>,
    pub custom_title: Option<String>,
    pub custom_source: Option<String>,
    pub moment: Option<String>,
    pub order_index: i32,
}

/// DTO for inserting a selection row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSelection {
    pub song_id: Option<DbId>,
    pub custom_title: Option<String>,
    pub custom_source: Option<String>,
    pub moment: Option<String>,
    pub order_index: i32,
}

/// A selection joined with its catalogue song title for admin detail views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelectionWithSong {
    pub id: DbId,
    pub booking_id: DbId,
    pub song_id: Option<DbId>,
    pub custom_title: Option<String>,
    pub custom_source: Option<String>,
    pub moment: Option<String>,
    pub order_index: i32,
    pub song_title: Option<String>,
}
