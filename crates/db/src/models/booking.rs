//! Booking entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serenata_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// `visible` is an orthogonal admin flag hiding the booking from default
/// listings; it never affects lifecycle transitions. `final_price_cents`
/// is the negotiated price attached at or after confirmation, displayed
/// alongside the original quote rather than replacing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    pub date: NaiveDate,
    pub venue: String,
    pub pack: String,
    pub price_cents: i64,
    pub final_price_cents: Option<i64>,
    pub visible: bool,
    pub source: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub client_id: DbId,
    pub date: NaiveDate,
    pub venue: String,
    pub pack: String,
    pub price_cents: i64,
    pub source: String,
}

/// A booking joined with its client for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingListItem {
    pub id: DbId,
    pub client_id: DbId,
    pub date: NaiveDate,
    pub venue: String,
    pub pack: String,
    pub price_cents: i64,
    pub final_price_cents: Option<i64>,
    pub visible: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub lifecycle_state: String,
    pub created_at: Timestamp,
}
