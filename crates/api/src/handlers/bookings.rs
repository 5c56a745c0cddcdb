//! Handlers for the admin booking pipeline.
//!
//! The lifecycle state lives on the booking's client; transitions are
//! validated against the allowed-next table and written as a single
//! conditional update so a concurrent operator action surfaces as a 409
//! instead of silently overwriting.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use serenata_core::error::CoreError;
use serenata_core::lifecycle::{self, LifecycleState};
use serenata_core::types::DbId;
use serenata_db::models::booking::Booking;
use serenata_db::models::client::Client;
use serenata_db::models::selection::SelectionWithSong;
use serenata_db::repositories::{BookingRepo, ClientRepo, SelectionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a booking exists, returning the full row.
async fn ensure_booking_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
}

/// Read and parse the lifecycle state of a booking's client.
async fn current_state(pool: &sqlx::PgPool, booking_id: DbId) -> AppResult<LifecycleState> {
    let raw = BookingRepo::lifecycle_state(pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    LifecycleState::from_str_db(&raw).map_err(AppError::Core)
}

// ---------------------------------------------------------------------------
// GET /admin/bookings
// ---------------------------------------------------------------------------

/// Listing filters and pagination.
#[derive(Debug, Deserialize)]
pub struct ListBookingsParams {
    #[serde(default)]
    pub include_hidden: bool,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List bookings joined with their client, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListBookingsParams>,
) -> AppResult<impl IntoResponse> {
    // Reject unknown state filters up front instead of returning an
    // empty list.
    if let Some(raw) = params.state.as_deref() {
        LifecycleState::from_str_db(raw).map_err(AppError::Core)?;
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let bookings = BookingRepo::list(
        &state.pool,
        params.include_hidden,
        params.state.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(DataResponse::new(bookings))
}

// ---------------------------------------------------------------------------
// GET /admin/bookings/{id}
// ---------------------------------------------------------------------------

/// Full booking detail for the admin view.
#[derive(Debug, Serialize)]
pub struct BookingDetail {
    pub booking: Booking,
    pub client: Client,
    pub lifecycle_state: String,
    pub allowed_transitions: Vec<&'static str>,
    pub selections: Vec<SelectionWithSong>,
}

/// Get a booking with its client, lifecycle state and song selections.
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = ensure_booking_exists(&state.pool, id).await?;
    let client = ClientRepo::find_by_id(&state.pool, booking.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: booking.client_id,
        }))?;
    let selections = SelectionRepo::list_with_songs(&state.pool, id).await?;

    let lifecycle_state = LifecycleState::from_str_db(&client.lifecycle_state)
        .map_err(AppError::Core)?;
    let allowed_transitions = lifecycle_state
        .allowed_next()
        .iter()
        .map(LifecycleState::as_str)
        .collect();

    Ok(DataResponse::new(BookingDetail {
        booking,
        client,
        lifecycle_state: lifecycle_state.as_str().to_string(),
        allowed_transitions,
        selections,
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/bookings/{id}/transition
// ---------------------------------------------------------------------------

/// Requested pipeline transition.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub to: String,
}

/// Result of a successful transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub booking_id: DbId,
    pub from: &'static str,
    pub to: &'static str,
}

/// Move a booking's client one step along the pipeline.
///
/// The write is conditioned on the state read here still holding; a
/// concurrent transition turns the update into a no-op and a 409.
pub async fn transition_booking(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_booking_exists(&state.pool, id).await?;

    let requested = LifecycleState::from_str_db(&body.to).map_err(AppError::Core)?;
    let current = current_state(&state.pool, id).await?;
    lifecycle::validate_transition(current, requested).map_err(AppError::Core)?;

    let updated =
        BookingRepo::update_lifecycle_state(&state.pool, id, current.as_str(), requested.as_str())
            .await?;
    if updated.is_none() {
        return Err(AppError::Core(CoreError::Conflict(
            "Lifecycle state changed concurrently; reload and retry".to_string(),
        )));
    }

    tracing::info!(
        booking_id = id,
        from = current.as_str(),
        to = requested.as_str(),
        "Booking lifecycle transition"
    );

    Ok(DataResponse::new(TransitionResponse {
        booking_id: id,
        from: current.as_str(),
        to: requested.as_str(),
    }))
}

// ---------------------------------------------------------------------------
// PUT /admin/bookings/{id}/final-price
// ---------------------------------------------------------------------------

/// Negotiated price payload.
#[derive(Debug, Deserialize)]
pub struct FinalPriceRequest {
    pub final_price_cents: i64,
}

/// Attach a negotiated final price to a confirmed-or-later booking.
///
/// The original quote is kept; the final price is displayed alongside it.
pub async fn set_final_price(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<FinalPriceRequest>,
) -> AppResult<impl IntoResponse> {
    if body.final_price_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Final price must not be negative".to_string(),
        )));
    }

    ensure_booking_exists(&state.pool, id).await?;

    let current = current_state(&state.pool, id).await?;
    if !current.allows_final_price() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Final price requires a confirmed booking; current state is '{}'",
            current.as_str()
        ))));
    }

    let booking = BookingRepo::set_final_price(&state.pool, id, body.final_price_cents)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    tracing::info!(
        booking_id = id,
        final_price_cents = body.final_price_cents,
        "Final price set"
    );

    Ok(DataResponse::new(booking))
}

// ---------------------------------------------------------------------------
// PUT /admin/bookings/{id}/visibility
// ---------------------------------------------------------------------------

/// Visibility flag payload.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

/// Hide or show a booking in default listings.
///
/// Orthogonal to the lifecycle: hiding never changes the pipeline state.
pub async fn set_visibility(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<VisibilityRequest>,
) -> AppResult<impl IntoResponse> {
    let booking = BookingRepo::set_visibility(&state.pool, id, body.visible)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    tracing::info!(booking_id = id, visible = body.visible, "Booking visibility set");

    Ok(DataResponse::new(booking))
}
