//! Handler for the public booking configurator submission.
//!
//! Rebuilds a [`BookingDraft`] from the submitted payload, re-runs every
//! completeness predicate server-side, and persists the client, booking
//! and selections in a single transaction. The quoted price comes from
//! the pricing table, never from the payload.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use serenata_core::ceremony;
use serenata_core::client::ClientDraft;
use serenata_core::cocktail::CocktailPreferences;
use serenata_core::configurator::{AvailabilityContext, BookingDraft};
use serenata_core::error::CoreError;
use serenata_core::song_selection::SongReference;
use serenata_core::submission;
use serenata_core::types::DbId;
use serenata_db::models::booking::CreateBooking;
use serenata_db::models::client::UpsertClient;
use serenata_db::models::selection::NewSelection;
use serenata_db::repositories::{BookingRepo, ClientRepo, SelectionRepo, SongRepo};
use serenata_notify::{BookingSummary, Notifier};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// One song choice: a catalogue song assigned to a moment, or a custom
/// song (optionally assigned to a moment).
#[derive(Debug, Deserialize)]
pub struct SongChoice {
    pub moment: Option<String>,
    pub song_id: Option<DbId>,
    pub custom_title: Option<String>,
    pub custom_source: Option<String>,
}

/// Cocktail preferences as submitted.
#[derive(Debug, Deserialize)]
pub struct CocktailPayload {
    pub selected_styles: Vec<String>,
    pub comment: Option<String>,
}

/// Client contact details as submitted.
#[derive(Debug, Deserialize)]
pub struct ClientPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub partner_name: Option<String>,
    pub venue: String,
    pub language_preference: Option<String>,
}

/// The completed configurator output.
#[derive(Debug, Deserialize)]
pub struct SubmitBookingRequest {
    pub pack: String,
    #[serde(default)]
    pub ceremony_moments: Vec<String>,
    pub first_person_name: Option<String>,
    pub second_person_name: Option<String>,
    #[serde(default)]
    pub songs: Vec<SongChoice>,
    pub cocktail: Option<CocktailPayload>,
    pub wedding_date: NaiveDate,
    pub client: ClientPayload,
}

/// Response payload for a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitBookingResponse {
    pub booking_id: DbId,
    pub client_id: DbId,
    pub price_cents: i64,
    /// Pipeline stage of the client after the submission; `CONTACTED` for
    /// a new client, the existing stage for a returning one.
    pub lifecycle_state: String,
    pub confirmation_message: &'static str,
}

// ---------------------------------------------------------------------------
// Draft reconstruction
// ---------------------------------------------------------------------------

/// A song choice may only target a ceremony moment the couple selected;
/// anything else would be dropped silently at persistence time.
fn ensure_selected_moment(selected: &BTreeSet<String>, moment: &str) -> Result<(), CoreError> {
    if ceremony::MOMENTS.iter().all(|m| m.id != moment) {
        return Err(CoreError::Validation(format!(
            "Unknown ceremony moment '{moment}'"
        )));
    }
    if !selected.contains(moment) {
        return Err(CoreError::Validation(format!(
            "Ceremony moment '{moment}' is not part of this booking"
        )));
    }
    Ok(())
}

/// Rebuild the domain draft from the submitted payload.
///
/// Catalogue song ids travel as opaque strings inside the draft; they are
/// parsed back to database ids when the selection rows are persisted.
fn build_draft(body: &SubmitBookingRequest) -> Result<BookingDraft, CoreError> {
    let pack = serenata_core::pack::Pack::from_str_db(&body.pack)?;

    let mut draft = BookingDraft {
        pack: Some(pack),
        ceremony_moments: body.ceremony_moments.iter().cloned().collect(),
        first_person_name: body.first_person_name.clone(),
        second_person_name: body.second_person_name.clone(),
        computed_price_cents: Some(pack.price_cents()),
        ..Default::default()
    };

    for choice in &body.songs {
        match (&choice.song_id, &choice.custom_title) {
            (Some(song_id), None) => {
                let moment = choice.moment.as_deref().ok_or_else(|| {
                    CoreError::Validation(
                        "Catalogue song choices must name a ceremony moment".to_string(),
                    )
                })?;
                ensure_selected_moment(&draft.ceremony_moments, moment)?;
                draft.songs.assign(
                    moment,
                    SongReference::Catalog {
                        song_id: song_id.to_string(),
                    },
                );
            }
            (None, Some(title)) => {
                if title.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "Custom songs need a title".to_string(),
                    ));
                }
                let custom_id = draft
                    .songs
                    .add_custom_song(title.clone(), choice.custom_source.clone());
                if let Some(moment) = choice.moment.as_deref() {
                    ensure_selected_moment(&draft.ceremony_moments, moment)?;
                    draft.songs.assign(moment, SongReference::Custom { custom_id });
                }
            }
            _ => {
                return Err(CoreError::Validation(
                    "Each song choice needs either a catalogue song_id or a custom_title"
                        .to_string(),
                ));
            }
        }
    }

    if let Some(cocktail) = &body.cocktail {
        draft.cocktail = CocktailPreferences {
            selected_styles: cocktail.selected_styles.iter().cloned().collect(),
            comment: cocktail.comment.clone(),
        };
    }

    draft.client = ClientDraft {
        first_name: body.client.first_name.clone(),
        last_name: body.client.last_name.clone(),
        email: body.client.email.clone(),
        phone: body.client.phone.clone(),
        partner_name: body.client.partner_name.clone(),
        wedding_date: Some(body.wedding_date),
        venue: body.client.venue.clone(),
        language_preference: body.client.language_preference.clone(),
    };

    Ok(draft)
}

/// Map the plan's string-typed selection rows back to database DTOs.
fn to_new_selections(
    rows: &[submission::SelectionRow],
) -> Result<Vec<NewSelection>, CoreError> {
    rows.iter()
        .map(|row| {
            let song_id = row
                .song_id
                .as_deref()
                .map(|s| {
                    s.parse::<DbId>().map_err(|_| {
                        CoreError::Validation(format!("Invalid catalogue song id '{s}'"))
                    })
                })
                .transpose()?;
            Ok(NewSelection {
                song_id,
                custom_title: row.custom_title.clone(),
                custom_source: row.custom_source.clone(),
                moment: row.moment_id.clone(),
                order_index: row.order_index,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// POST /configure
// ---------------------------------------------------------------------------

/// Accept a completed configurator draft and record the booking request.
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(body): Json<SubmitBookingRequest>,
) -> AppResult<impl IntoResponse> {
    let draft = build_draft(&body).map_err(AppError::Core)?;

    // Catalogue references must resolve before anything is written.
    let catalog_ids: Vec<DbId> = draft
        .songs
        .iter()
        .filter_map(|(_, song)| song.catalog_id())
        .filter_map(|s| s.parse().ok())
        .collect();
    let missing = SongRepo::missing_ids(&state.pool, &catalog_ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown catalogue songs: {missing:?}"
        ))));
    }

    // Availability is checked against committed bookings on the same date.
    let busy = BookingRepo::busy_dates(&state.pool, body.wedding_date, body.wedding_date).await?;
    let ctx = AvailabilityContext {
        today: chrono::Utc::now().date_naive(),
        busy_dates: busy.into_iter().collect::<BTreeSet<_>>(),
    };

    let plan = submission::build_plan(&draft, &ctx).map_err(AppError::Core)?;
    let selections = to_new_selections(&plan.selections).map_err(AppError::Core)?;

    // Client upsert, booking insert and selection inserts are atomic.
    let mut tx = state.pool.begin().await?;

    let client = ClientRepo::upsert_by_email(
        &mut *tx,
        &UpsertClient {
            first_name: draft.client.first_name.clone(),
            last_name: draft.client.last_name.clone(),
            email: draft.client.email.clone(),
            phone: draft.client.phone.clone(),
            partner_name: draft.client.partner_name.clone(),
            wedding_date: draft.client.wedding_date,
            language_preference: draft
                .client
                .language_preference
                .clone()
                .unwrap_or_else(|| "en".to_string()),
        },
    )
    .await?;

    let booking = BookingRepo::create(
        &mut *tx,
        &CreateBooking {
            client_id: client.id,
            date: body.wedding_date,
            venue: draft.client.venue.clone(),
            pack: plan.pack.as_str().to_string(),
            price_cents: plan.price_cents,
            source: "configurator".to_string(),
        },
    )
    .await?;

    SelectionRepo::insert_many(&mut *tx, booking.id, &selections).await?;

    tx.commit().await?;

    tracing::info!(
        booking_id = booking.id,
        client_id = client.id,
        pack = plan.pack.as_str(),
        price_cents = plan.price_cents,
        "Booking request recorded"
    );

    // Notification delivery is best-effort; a mail outage never fails the
    // submission.
    if let Some(notifier) = &state.notifier {
        let summary = BookingSummary {
            booking_id: booking.id,
            client_name: format!("{} {}", client.first_name, client.last_name),
            client_email: client.email.clone(),
            client_phone: client.phone.clone(),
            wedding_date: body.wedding_date,
            venue: booking.venue.clone(),
            pack_label: plan.pack.label().to_string(),
            price_cents: plan.price_cents,
            song_count: selections.len(),
        };
        spawn_notification(Arc::clone(notifier), summary);
    }

    Ok(DataResponse::created(SubmitBookingResponse {
        booking_id: booking.id,
        client_id: client.id,
        price_cents: plan.price_cents,
        lifecycle_state: client.lifecycle_state.clone(),
        confirmation_message: plan.confirmation_message,
    }))
}

fn spawn_notification(notifier: Arc<Notifier>, summary: BookingSummary) {
    tokio::spawn(async move {
        if let Err(err) = notifier.send_booking_notification(&summary).await {
            tracing::warn!(
                booking_id = summary.booking_id,
                error = %err,
                "Booking notification email failed"
            );
        }
    });
}
