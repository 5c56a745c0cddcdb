//! HTTP-level integration tests for the admin booking pipeline.
//!
//! Bookings are created through the public configurator endpoint so the
//! admin tests exercise the same rows production would see.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Submit a cocktail-only booking and return its id.
async fn submit_booking(pool: &PgPool, email: &str, date: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/configure",
        serde_json::json!({
            "pack": "COCKTAIL_1H",
            "cocktail": { "selected_styles": ["jazz", "pop", "latin"], "comment": null },
            "wedding_date": date,
            "client": {
                "first_name": "Maria",
                "last_name": "Rivera",
                "email": email,
                "phone": "+34 600 000 001",
                "partner_name": "Alex",
                "venue": "Finca El Olivar",
                "language_preference": "en"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["booking_id"].as_i64().unwrap()
}

async fn transition(pool: &PgPool, booking_id: i64, to: &str) -> StatusCode {
    post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/bookings/{booking_id}/transition"),
        serde_json::json!({ "to": to }),
    )
    .await
    .status()
}

// ---------------------------------------------------------------------------
// Test: listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_shows_new_booking_as_contacted(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    let json = body_json(get(build_test_app(pool), "/api/v1/admin/bookings").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_i64().unwrap(), booking_id);
    assert_eq!(data[0]["lifecycle_state"], "CONTACTED");
    assert_eq!(data[0]["email"], "maria@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rejects_unknown_state_filter(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/admin/bookings?state=WEIRD").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: lifecycle transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_happy_path_walks_the_pipeline(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    for to in ["NEGOTIATING", "CONFIRMED", "PAID", "REALIZED"] {
        assert_eq!(transition(&pool, booking_id, to).await, StatusCode::OK, "{to}");
    }

    let detail = body_json(get(
        build_test_app(pool),
        &format!("/api/v1/admin/bookings/{booking_id}"),
    )
    .await)
    .await;
    assert_eq!(detail["data"]["lifecycle_state"], "REALIZED");
    assert!(detail["data"]["allowed_transitions"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_skipping_a_state_is_a_conflict(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/bookings/{booking_id}/transition"),
        serde_json::json!({ "to": "PAID" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");

    // Nothing changed.
    let detail = body_json(get(
        build_test_app(pool),
        &format!("/api/v1/admin/bookings/{booking_id}"),
    )
    .await)
    .await;
    assert_eq!(detail["data"]["lifecycle_state"], "CONTACTED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_terminal_states_admit_no_transitions(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    assert_eq!(transition(&pool, booking_id, "CANCELLED").await, StatusCode::OK);
    assert_eq!(
        transition(&pool, booking_id, "NEGOTIATING").await,
        StatusCode::CONFLICT
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_transition_validates_state_string(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;
    assert_eq!(
        transition(&pool, booking_id, "SHIPPED").await,
        StatusCode::BAD_REQUEST
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_transition_on_missing_booking_is_404(pool: PgPool) {
    assert_eq!(transition(&pool, 999_999, "NEGOTIATING").await, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: final price
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_final_price_requires_confirmed_state(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/bookings/{booking_id}/final-price"),
        serde_json::json!({ "final_price_cents": 42_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    transition(&pool, booking_id, "NEGOTIATING").await;
    transition(&pool, booking_id, "CONFIRMED").await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/bookings/{booking_id}/final-price"),
        serde_json::json!({ "final_price_cents": 42_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["final_price_cents"], 42_000);
    // The original quote stays.
    assert_eq!(json["data"]["price_cents"], 30_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_negative_final_price_rejected(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/admin/bookings/{booking_id}/final-price"),
        serde_json::json!({ "final_price_cents": -1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_hidden_bookings_leave_default_listings(pool: PgPool) {
    let booking_id = submit_booking(&pool, "maria@example.com", "2030-06-12").await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/bookings/{booking_id}/visibility"),
        serde_json::json!({ "visible": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/admin/bookings").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let json = body_json(
        get(
            build_test_app(pool.clone()),
            "/api/v1/admin/bookings?include_hidden=true",
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Hiding never touches the pipeline state.
    let detail = body_json(get(
        build_test_app(pool),
        &format!("/api/v1/admin/bookings/{booking_id}"),
    )
    .await)
    .await;
    assert_eq!(detail["data"]["lifecycle_state"], "CONTACTED");
}
