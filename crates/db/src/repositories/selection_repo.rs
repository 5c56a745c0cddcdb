//! Repository for the `selections` table.

use sqlx::{PgConnection, PgPool};

use serenata_core::types::DbId;

use crate::models::selection::{NewSelection, Selection, SelectionWithSong};

const COLUMNS: &str = "id, booking_id, song_id, custom_title, custom_source, moment, order_index";

/// Provides CRUD operations for booking song selections.
pub struct SelectionRepo;

impl SelectionRepo {
    /// Insert the full selection set for a booking inside the submission
    /// transaction. Rows are inserted one by one in order; the set is
    /// small (bounded by ceremony moments plus custom songs).
    pub async fn insert_many(
        conn: &mut PgConnection,
        booking_id: DbId,
        rows: &[NewSelection],
    ) -> Result<(), sqlx::Error> {
        for row in rows {
            sqlx::query(
                "INSERT INTO selections \
                     (booking_id, song_id, custom_title, custom_source, moment, order_index) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(booking_id)
            .bind(row.song_id)
            .bind(&row.custom_title)
            .bind(&row.custom_source)
            .bind(&row.moment)
            .bind(row.order_index)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// List a booking's selections in submission order.
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Selection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM selections WHERE booking_id = $1 ORDER BY order_index ASC"
        );
        sqlx::query_as::<_, Selection>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// List a booking's selections joined with catalogue song titles, for
    /// the admin detail view.
    pub async fn list_with_songs(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<SelectionWithSong>, sqlx::Error> {
        let query = "SELECT sel.id, sel.booking_id, sel.song_id, sel.custom_title, \
                sel.custom_source, sel.moment, sel.order_index, s.title AS song_title \
             FROM selections sel \
             LEFT JOIN songs s ON s.id = sel.song_id \
             WHERE sel.booking_id = $1 \
             ORDER BY sel.order_index ASC";
        sqlx::query_as::<_, SelectionWithSong>(query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }
}
