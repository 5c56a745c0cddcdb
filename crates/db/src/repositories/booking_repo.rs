//! Repository for the `bookings` table.
//!
//! The lifecycle state lives on `clients`; booking-scoped transition
//! methods here resolve the client through the booking row so the admin
//! API can stay keyed on booking IDs.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};

use serenata_core::types::DbId;

use crate::models::booking::{Booking, BookingListItem, CreateBooking};

const COLUMNS: &str = "id, client_id, date, venue, pack, price_cents, final_price_cents, \
     visible, source, created_at, updated_at";

/// Client lifecycle states that block a wedding date for new bookings.
const BLOCKING_STATES: &str = "('CONFIRMED', 'PAID', 'REALIZED')";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking inside the submission transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        dto: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (client_id, date, venue, pack, price_cents, source) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(dto.client_id)
            .bind(dto.date)
            .bind(&dto.venue)
            .bind(&dto.pack)
            .bind(dto.price_cents)
            .bind(&dto.source)
            .fetch_one(executor)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings joined with their client, newest first.
    ///
    /// Hidden bookings are excluded unless `include_hidden` is set;
    /// `state` filters on the client's lifecycle state when given.
    pub async fn list(
        pool: &PgPool,
        include_hidden: bool,
        state: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookingListItem>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if !include_hidden {
            conditions.push("b.visible = TRUE");
        }
        if state.is_some() {
            conditions.push("c.lifecycle_state = $3");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT b.id, b.client_id, b.date, b.venue, b.pack, b.price_cents, \
                 b.final_price_cents, b.visible, c.first_name, c.last_name, c.email, \
                 c.lifecycle_state, b.created_at \
             FROM bookings b \
             JOIN clients c ON c.id = b.client_id \
             {where_clause}ORDER BY b.created_at DESC \
             LIMIT $1 OFFSET $2"
        );

        let mut q = sqlx::query_as::<_, BookingListItem>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(state) = state {
            q = q.bind(state);
        }
        q.fetch_all(pool).await
    }

    /// Move a booking's client from `expected_state` to `next_state` as a
    /// single conditional update.
    ///
    /// Returns the updated state, or `None` when the client is no longer
    /// in `expected_state` (a concurrent transition won) or the booking
    /// does not exist. The caller distinguishes the two by fetching the
    /// booking first.
    pub async fn update_lifecycle_state(
        pool: &PgPool,
        booking_id: DbId,
        expected_state: &str,
        next_state: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "UPDATE clients SET lifecycle_state = $3, updated_at = now() \
             WHERE id = (SELECT client_id FROM bookings WHERE id = $1) \
               AND lifecycle_state = $2 \
             RETURNING lifecycle_state",
        )
        .bind(booking_id)
        .bind(expected_state)
        .bind(next_state)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(state,)| state))
    }

    /// Read the lifecycle state of a booking's client.
    pub async fn lifecycle_state(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT c.lifecycle_state FROM bookings b \
             JOIN clients c ON c.id = b.client_id \
             WHERE b.id = $1",
        )
        .bind(booking_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(state,)| state))
    }

    /// Set the hidden/visible flag. Returns the updated booking.
    pub async fn set_visibility(
        pool: &PgPool,
        id: DbId,
        visible: bool,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET visible = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(visible)
            .fetch_optional(pool)
            .await
    }

    /// Attach a negotiated final price. Returns the updated booking.
    pub async fn set_final_price(
        pool: &PgPool,
        id: DbId,
        final_price_cents: i64,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET final_price_cents = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(final_price_cents)
            .fetch_optional(pool)
            .await
    }

    /// Dates within `[from, to]` already taken by a committed booking
    /// (client in a confirmed-or-later, non-cancelled state).
    pub async fn busy_dates(
        pool: &PgPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT b.date FROM bookings b \
             JOIN clients c ON c.id = b.client_id \
             WHERE b.date BETWEEN $1 AND $2 \
               AND c.lifecycle_state IN {BLOCKING_STATES} \
             ORDER BY b.date ASC"
        );
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}
