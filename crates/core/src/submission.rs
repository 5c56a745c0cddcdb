//! Submission assembly: from a completed draft to persistable rows.
//!
//! The boundary between the client-facing configurator and the admin-side
//! lifecycle. Given a draft that passed every completeness predicate, this
//! produces the authoritative price (from the pricing table, never from
//! client input) and the ordered selection rows the persistence layer
//! writes alongside the booking.

use serde::Serialize;

use crate::ceremony;
use crate::configurator::{draft_complete, AvailabilityContext, BookingDraft};
use crate::error::CoreError;
use crate::pack::Pack;
use crate::song_selection::SongReference;

/// Confirmation shown to the user after a successful submission.
pub const CONFIRMATION_MESSAGE: &str =
    "We have received your request. You will get a proposal by email shortly.";

/// One selection row to persist: either a catalogue song assigned to a
/// ceremony moment, or a custom song (tagged with a moment when it was
/// assigned to one, moment-less when free-standing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRow {
    pub song_id: Option<String>,
    pub custom_title: Option<String>,
    pub custom_source: Option<String>,
    pub moment_id: Option<String>,
    pub order_index: i32,
}

/// Everything the persistence layer needs to record a submission.
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    pub pack: Pack,
    /// From the pricing table, keyed by pack. Client input is ignored.
    pub price_cents: i64,
    pub selections: Vec<SelectionRow>,
    pub confirmation_message: &'static str,
}

/// Build the selection rows for a draft.
///
/// Catalogue assignments come first, in ceremony order, with order indices
/// starting at 0; custom songs follow, continuing the same sequence.
pub fn build_selection_rows(draft: &BookingDraft) -> Vec<SelectionRow> {
    let mut rows = Vec::new();
    let mut order_index = 0i32;
    let ceremony_pack = draft.pack.is_some_and(|p| p.includes_ceremony());

    if ceremony_pack {
        for moment in ceremony::MOMENTS {
            if !draft.ceremony_moments.contains(moment.id) {
                continue;
            }
            if let Some(SongReference::Catalog { song_id }) = draft.songs.selection(moment.id) {
                rows.push(SelectionRow {
                    song_id: Some(song_id.clone()),
                    custom_title: None,
                    custom_source: None,
                    moment_id: Some(moment.id.to_string()),
                    order_index,
                });
                order_index += 1;
            }
        }
    }

    for custom in draft.songs.custom_songs() {
        let moment_id = if ceremony_pack {
            draft.songs.moment_for_custom(&custom.id).map(str::to_string)
        } else {
            None
        };
        rows.push(SelectionRow {
            song_id: None,
            custom_title: Some(custom.title.clone()),
            custom_source: custom.source_url.clone(),
            moment_id,
            order_index,
        });
        order_index += 1;
    }

    rows
}

/// Validate the draft and assemble the submission plan.
///
/// Fails with the first unmet completeness predicate; no partial plan is
/// ever produced.
pub fn build_plan(
    draft: &BookingDraft,
    ctx: &AvailabilityContext,
) -> Result<SubmissionPlan, CoreError> {
    draft_complete(draft, ctx)?;

    let pack = draft
        .pack
        .ok_or_else(|| CoreError::Validation("Select a pack to continue".to_string()))?;

    Ok(SubmissionPlan {
        pack,
        price_cents: pack.price_cents(),
        selections: build_selection_rows(draft),
        confirmation_message: CONFIRMATION_MESSAGE,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::client::ClientDraft;
    use crate::cocktail::CocktailPreferences;
    use crate::song_selection::SongReference;

    fn ctx() -> AvailabilityContext {
        AvailabilityContext {
            today: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            busy_dates: BTreeSet::new(),
        }
    }

    fn catalog(id: &str) -> SongReference {
        SongReference::Catalog { song_id: id.to_string() }
    }

    fn client() -> ClientDraft {
        ClientDraft {
            first_name: "Marta".into(),
            last_name: "García".into(),
            email: "marta@example.com".into(),
            phone: "+34 600 000 000".into(),
            partner_name: Some("Jon".into()),
            wedding_date: NaiveDate::from_ymd_opt(2026, 6, 20),
            venue: "Finca La Arboleda".into(),
            language_preference: None,
        }
    }

    fn ceremony_cocktail_draft() -> BookingDraft {
        let mut draft = BookingDraft {
            pack: Some(Pack::CeremonyCocktail1h),
            ceremony_moments: ["first_entrance", "second_entrance", "exit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cocktail: CocktailPreferences::default(),
            client: client(),
            computed_price_cents: Some(Pack::CeremonyCocktail1h.price_cents()),
            ..Default::default()
        };
        draft.songs.assign("first_entrance", catalog("1"));
        draft.songs.assign("second_entrance", catalog("2"));
        draft.songs.assign("exit", catalog("3"));
        draft
    }

    #[test]
    fn full_ceremony_cocktail_plan() {
        let plan = build_plan(&ceremony_cocktail_draft(), &ctx()).unwrap();
        assert_eq!(plan.price_cents, 45_000);
        assert_eq!(plan.selections.len(), 3);
        assert_eq!(
            plan.selections.iter().map(|r| r.order_index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        // Rows follow ceremony order, not map order.
        assert_eq!(plan.selections[0].moment_id.as_deref(), Some("first_entrance"));
        assert_eq!(plan.selections[1].moment_id.as_deref(), Some("second_entrance"));
        assert_eq!(plan.selections[2].moment_id.as_deref(), Some("exit"));
    }

    #[test]
    fn cocktail_only_plan_has_no_selections() {
        let draft = BookingDraft {
            pack: Some(Pack::Cocktail1_5h),
            cocktail: CocktailPreferences::default(),
            client: client(),
            ..Default::default()
        };
        let plan = build_plan(&draft, &ctx()).unwrap();
        assert_eq!(plan.price_cents, 37_000);
        assert!(plan.selections.is_empty());
    }

    #[test]
    fn custom_songs_continue_the_order_sequence() {
        let mut draft = ceremony_cocktail_draft();
        let custom_id = draft.songs.add_custom_song("Our song".into(), Some("https://example.com/v".into()));
        draft.songs.assign("exit", SongReference::Custom { custom_id });
        draft.songs.add_custom_song("Free-standing".into(), None);

        let rows = build_selection_rows(&draft);
        // Two catalogue rows (exit is now custom), then two custom rows.
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].song_id.as_deref(), Some("1"));
        assert_eq!(rows[1].song_id.as_deref(), Some("2"));
        assert_eq!(rows[2].custom_title.as_deref(), Some("Our song"));
        assert_eq!(rows[2].moment_id.as_deref(), Some("exit"));
        assert_eq!(rows[3].custom_title.as_deref(), Some("Free-standing"));
        assert_eq!(rows[3].moment_id, None);
        assert_eq!(rows.iter().map(|r| r.order_index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn price_always_comes_from_the_pricing_table() {
        let mut draft = ceremony_cocktail_draft();
        // A tampered draft price is ignored.
        draft.computed_price_cents = Some(1);
        let plan = build_plan(&draft, &ctx()).unwrap();
        assert_eq!(plan.price_cents, Pack::CeremonyCocktail1h.price_cents());
    }

    #[test]
    fn incomplete_draft_yields_no_plan() {
        let mut draft = ceremony_cocktail_draft();
        draft.songs.clear("exit");
        assert!(build_plan(&draft, &ctx()).is_err());

        let mut draft = ceremony_cocktail_draft();
        draft.client.email = "nope".into();
        assert!(build_plan(&draft, &ctx()).is_err());
    }

    #[test]
    fn busy_wedding_date_yields_no_plan() {
        let mut context = ctx();
        context.busy_dates.insert(NaiveDate::from_ymd_opt(2026, 6, 20).unwrap());
        assert!(build_plan(&ceremony_cocktail_draft(), &context).is_err());
    }
}
