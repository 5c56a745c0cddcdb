//! Repository for the `songs` catalogue table.

use sqlx::PgPool;

use serenata_core::types::DbId;

use crate::models::song::Song;

const COLUMNS: &str = "id, title, composer, genre, duration_sec, is_featured, created_at";

/// Provides read access to the song catalogue.
pub struct SongRepo;

impl SongRepo {
    /// List catalogue songs, optionally filtered by a case-insensitive
    /// title/composer substring and/or the featured flag.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        featured: Option<bool>,
    ) -> Result<Vec<Song>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        if search.is_some() {
            conditions.push("(title ILIKE $1 OR composer ILIKE $1)".to_string());
        }
        if featured.is_some() {
            conditions.push(format!(
                "is_featured = ${}",
                if search.is_some() { 2 } else { 1 }
            ));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {COLUMNS} FROM songs {where_clause}ORDER BY is_featured DESC, title ASC"
        );

        let mut q = sqlx::query_as::<_, Song>(&query);
        if let Some(term) = search {
            q = q.bind(format!("%{term}%"));
        }
        if let Some(flag) = featured {
            q = q.bind(flag);
        }
        q.fetch_all(pool).await
    }

    /// Number of catalogue songs. The health probe uses this as its
    /// connectivity check.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM songs")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find a song by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE id = $1");
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check that every ID in `ids` exists in the catalogue. Returns the
    /// missing IDs, empty when all resolve.
    pub async fn missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM songs WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        let found: std::collections::HashSet<DbId> = rows.into_iter().map(|(id,)| id).collect();
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }
}
