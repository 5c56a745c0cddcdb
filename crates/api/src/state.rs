use std::sync::Arc;

use serenata_notify::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: serenata_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Booking notification mailer; `None` when SMTP is not configured.
    pub notifier: Option<Arc<Notifier>>,
}
