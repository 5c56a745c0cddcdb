//! Handler for wedding date availability.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;

use serenata_db::repositories::BookingRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Date range for the availability query.
#[derive(Debug, Deserialize)]
pub struct BusyDatesParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /calendar — dates in `[from, to]` already taken by a committed
/// booking. The configurator greys these out in the date step.
pub async fn busy_dates(
    State(state): State<AppState>,
    Query(params): Query<BusyDatesParams>,
) -> AppResult<impl IntoResponse> {
    if params.from > params.to {
        return Err(AppError::BadRequest(
            "'from' must not be after 'to'".to_string(),
        ));
    }
    let dates = BookingRepo::busy_dates(&state.pool, params.from, params.to).await?;
    Ok(DataResponse::new(dates))
}
