//! Client entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serenata_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `clients` table.
///
/// `lifecycle_state` is the canonical lead pipeline stage; bookings carry
/// no second independently mutable state field.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub partner_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub language_preference: String,
    pub lifecycle_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a client keyed by email.
///
/// On an email collision the profile fields are updated on the existing
/// row; the lifecycle state is left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub partner_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub language_preference: String,
}
