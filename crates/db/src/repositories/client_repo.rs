//! Repository for the `clients` table.

use sqlx::{PgExecutor, PgPool};

use serenata_core::types::DbId;

use crate::models::client::{Client, UpsertClient};

/// Column list for `clients` queries.
const COLUMNS: &str = "id, first_name, last_name, email, phone, partner_name, \
     wedding_date, language_preference, lifecycle_state, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client or, on an email collision, update the existing
    /// row's profile fields.
    ///
    /// Upsert semantics are keyed by exact-match email: a repeat
    /// submission refreshes name/phone/partner/date on the same client
    /// instead of duplicating it, and the lifecycle state is preserved.
    pub async fn upsert_by_email<'e>(
        executor: impl PgExecutor<'e>,
        dto: &UpsertClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients \
                 (first_name, last_name, email, phone, partner_name, wedding_date, language_preference) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT ON CONSTRAINT uq_clients_email DO UPDATE SET \
                 first_name = EXCLUDED.first_name, \
                 last_name = EXCLUDED.last_name, \
                 phone = EXCLUDED.phone, \
                 partner_name = EXCLUDED.partner_name, \
                 wedding_date = EXCLUDED.wedding_date, \
                 language_preference = EXCLUDED.language_preference, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.partner_name)
            .bind(dto.wedding_date)
            .bind(&dto.language_preference)
            .fetch_one(executor)
            .await
    }

    /// Find a client by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
