//! HTTP-level integration tests for the song catalogue and availability
//! calendar. Seed data (12 catalogue songs) is created by migrations.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: GET /api/v1/songs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_songs_featured_first(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/songs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 12, "should return all seeded catalogue songs");

    // Featured entries sort before the rest.
    let first_unfeatured = data
        .iter()
        .position(|s| s["is_featured"] == false)
        .unwrap();
    assert!(data[..first_unfeatured]
        .iter()
        .all(|s| s["is_featured"] == true));
    assert!(data[first_unfeatured..]
        .iter()
        .all(|s| s["is_featured"] == false));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_songs_filters(pool: PgPool) {
    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/songs?featured=true").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert!(data.iter().all(|s| s["is_featured"] == true));

    // Substring search matches title or composer, case-insensitively.
    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/songs?q=sheeran").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(build_test_app(pool), "/api/v1/songs?q=canon").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Canon in D");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_song_by_id(pool: PgPool) {
    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/songs?q=canon").await).await;
    let id = json["data"][0]["id"].as_i64().unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/songs/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Canon in D");

    let response = get(build_test_app(pool), "/api/v1/songs/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/calendar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_calendar_reflects_committed_bookings(pool: PgPool) {
    let range = "/api/v1/calendar?from=2030-06-01&to=2030-06-30";

    let json = body_json(get(build_test_app(pool.clone()), range).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Submit a booking and confirm it.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/configure",
        serde_json::json!({
            "pack": "COCKTAIL_1H",
            "cocktail": { "selected_styles": ["jazz", "pop", "latin"], "comment": null },
            "wedding_date": "2030-06-12",
            "client": {
                "first_name": "Maria",
                "last_name": "Rivera",
                "email": "maria@example.com",
                "phone": "+34 600 000 001",
                "partner_name": "Alex",
                "venue": "Finca El Olivar",
                "language_preference": "en"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id = body_json(response).await["data"]["booking_id"].as_i64().unwrap();

    // Unconfirmed bookings do not block the date.
    let json = body_json(get(build_test_app(pool.clone()), range).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    for to in ["NEGOTIATING", "CONFIRMED"] {
        post_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/admin/bookings/{booking_id}/transition"),
            serde_json::json!({ "to": to }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool), range).await).await;
    assert_eq!(json["data"], serde_json::json!(["2030-06-12"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_calendar_rejects_inverted_range(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        "/api/v1/calendar?from=2030-06-30&to=2030-06-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: GET /health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_readiness(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    // The seeded catalogue is part of readiness; test apps have no SMTP.
    assert_eq!(json["catalogue_songs"], 12);
    assert_eq!(json["notifier_configured"], false);
}
