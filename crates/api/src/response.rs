//! Success envelope for the JSON API.
//!
//! Every successful payload is wrapped as `{ "data": ... }` so the
//! configurator and admin frontends unwrap responses uniformly; failures
//! use the `{ "error", "code" }` shape produced by [`crate::error::AppError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `{ "data": T }` envelope. Converts straight into a 200 response, so
/// handlers return `DataResponse::new(payload)` without wrapping in `Json`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// 201 variant, for the submission endpoint that creates a booking.
    pub fn created(data: T) -> (StatusCode, Self) {
        (StatusCode::CREATED, Self::new(data))
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
