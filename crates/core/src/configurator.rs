//! The multi-step booking configurator state machine.
//!
//! The legal step sequence is a function of the selected pack: ceremony
//! packs visit the moment and song steps, cocktail packs visit the style
//! step, combined packs visit both. The step graph is explicit — tagged
//! [`StepKind`] variants plus pure [`next_step`]/[`previous_step`] functions
//! — so navigation is independent of any UI state. The accumulated
//! [`BookingDraft`] is a single owned value; forward transitions merge a
//! step's partial answer and are gated on that step's completeness
//! predicate, backward transitions are pack-aware and skip steps the pack
//! does not use.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ceremony;
use crate::client::ClientDraft;
use crate::cocktail::CocktailPreferences;
use crate::error::CoreError;
use crate::pack::Pack;
use crate::song_selection::SongSelectionTracker;

// ---------------------------------------------------------------------------
// Step graph
// ---------------------------------------------------------------------------

/// The kinds of wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Pack,
    CeremonyMoments,
    SongSelection,
    CocktailPreferences,
    DateSelection,
    ClientInfo,
    Review,
}

impl StepKind {
    /// Human-readable label for the step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pack => "Pack",
            Self::CeremonyMoments => "Ceremony moments",
            Self::SongSelection => "Song selection",
            Self::CocktailPreferences => "Cocktail preferences",
            Self::DateSelection => "Date",
            Self::ClientInfo => "Your details",
            Self::Review => "Review",
        }
    }
}

/// The ordered step sequence for a pack.
///
/// Ceremony-bearing packs visit `CeremonyMoments` and `SongSelection`;
/// cocktail-bearing packs visit `CocktailPreferences`; every pack ends with
/// `DateSelection`, `ClientInfo` and `Review`.
pub fn step_sequence(pack: Pack) -> Vec<StepKind> {
    let mut seq = vec![StepKind::Pack];
    if pack.includes_ceremony() {
        seq.push(StepKind::CeremonyMoments);
        seq.push(StepKind::SongSelection);
    }
    if pack.includes_cocktail() {
        seq.push(StepKind::CocktailPreferences);
    }
    seq.push(StepKind::DateSelection);
    seq.push(StepKind::ClientInfo);
    seq.push(StepKind::Review);
    seq
}

/// The step after `current` for the given pack, or `None` at the end.
pub fn next_step(pack: Pack, current: StepKind) -> Option<StepKind> {
    let seq = step_sequence(pack);
    let pos = seq.iter().position(|s| *s == current)?;
    seq.get(pos + 1).copied()
}

/// The step before `current` for the given pack, or `None` at the start.
///
/// Backward navigation is pack-aware: from the date step a cocktail-only
/// pack returns to the style step, a ceremony-only pack to the song step.
pub fn previous_step(pack: Pack, current: StepKind) -> Option<StepKind> {
    let seq = step_sequence(pack);
    let pos = seq.iter().position(|s| *s == current)?;
    pos.checked_sub(1).map(|p| seq[p])
}

// ---------------------------------------------------------------------------
// Availability context
// ---------------------------------------------------------------------------

/// External availability inputs for the date predicate.
///
/// Injected so the predicate stays pure; the caller fetches busy dates from
/// the calendar collaborator.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityContext {
    pub today: NaiveDate,
    pub busy_dates: BTreeSet<NaiveDate>,
}

impl AvailabilityContext {
    /// A date is selectable when it is neither in the past nor busy.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.today && !self.busy_dates.contains(&date)
    }
}

// ---------------------------------------------------------------------------
// Booking draft
// ---------------------------------------------------------------------------

/// The in-progress, unpersisted booking assembled by the wizard.
///
/// Created empty at wizard start and mutated step by step; either discarded
/// or handed to the submission assembler once every predicate holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub pack: Option<Pack>,
    pub ceremony_moments: BTreeSet<String>,
    pub first_person_name: Option<String>,
    pub second_person_name: Option<String>,
    pub songs: SongSelectionTracker,
    pub cocktail: CocktailPreferences,
    pub client: ClientDraft,
    /// Quoted price, recomputed from the pricing table on every pack change.
    pub computed_price_cents: Option<i64>,
}

/// A step's partial answer, merged into the draft on forward transitions.
///
/// Song assignments are interactive rather than answer-shaped; they go
/// through [`BookingDraft::songs`] directly as the user picks songs.
#[derive(Debug, Clone)]
pub enum StepAnswer {
    Pack(Pack),
    CeremonyMoments {
        moments: BTreeSet<String>,
        first_person_name: Option<String>,
        second_person_name: Option<String>,
    },
    Cocktail(CocktailPreferences),
    Date(NaiveDate),
    Client(ClientDraft),
}

// ---------------------------------------------------------------------------
// Completeness predicates
// ---------------------------------------------------------------------------

/// Check whether a step's completeness predicate holds for the draft.
pub fn step_complete(
    draft: &BookingDraft,
    step: StepKind,
    ctx: &AvailabilityContext,
) -> Result<(), CoreError> {
    match step {
        StepKind::Pack => {
            if draft.pack.is_none() {
                return Err(CoreError::Validation("Select a pack to continue".to_string()));
            }
        }
        StepKind::CeremonyMoments => {
            for id in &draft.ceremony_moments {
                if ceremony::moment(id).is_none() {
                    return Err(CoreError::Validation(format!(
                        "Unknown ceremony moment '{id}'"
                    )));
                }
            }
            if !ceremony::has_required(&draft.ceremony_moments) {
                return Err(CoreError::Validation(
                    "All required ceremony moments must be selected".to_string(),
                ));
            }
        }
        StepKind::SongSelection => {
            let missing: Vec<&str> = draft
                .ceremony_moments
                .iter()
                .map(String::as_str)
                .filter(|id| draft.songs.selection(id).is_none())
                .collect();
            if !missing.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Every selected moment needs a song; missing: {}",
                    missing.join(", ")
                )));
            }
            if draft.songs.has_duplicates() {
                return Err(CoreError::Validation(
                    "Each moment must have a different song".to_string(),
                ));
            }
        }
        StepKind::CocktailPreferences => {
            draft.cocktail.validate()?;
        }
        StepKind::DateSelection => {
            let date = draft.client.wedding_date.ok_or_else(|| {
                CoreError::Validation("Choose a wedding date".to_string())
            })?;
            if date < ctx.today {
                return Err(CoreError::Validation(format!(
                    "Wedding date {date} is in the past"
                )));
            }
            if ctx.busy_dates.contains(&date) {
                return Err(CoreError::Validation(format!(
                    "Wedding date {date} is no longer available"
                )));
            }
        }
        StepKind::ClientInfo => {
            draft.client.validate()?;
        }
        StepKind::Review => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Configurator
// ---------------------------------------------------------------------------

/// The wizard's cursor plus the accumulated draft.
#[derive(Debug, Clone)]
pub struct Configurator {
    current: StepKind,
    draft: BookingDraft,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurator {
    /// Start a fresh wizard at the pack step with an empty draft.
    pub fn new() -> Self {
        Self {
            current: StepKind::Pack,
            draft: BookingDraft::default(),
        }
    }

    pub fn current_step(&self) -> StepKind {
        self.current
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Mutable access to the draft for interactive operations (song
    /// assignment, moment toggling) that happen within a step.
    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// Merge a step's partial answer into the draft.
    ///
    /// Only the answer's own fields are touched. Selecting a pack
    /// recomputes the quoted price from the pricing table; required
    /// ceremony moments are re-added if the answer tried to drop them.
    pub fn apply(&mut self, answer: StepAnswer) -> Result<(), CoreError> {
        match answer {
            StepAnswer::Pack(pack) => {
                self.draft.pack = Some(pack);
                self.draft.computed_price_cents = Some(pack.price_cents());
            }
            StepAnswer::CeremonyMoments {
                moments,
                first_person_name,
                second_person_name,
            } => {
                for id in &moments {
                    if ceremony::moment(id).is_none() {
                        return Err(CoreError::Validation(format!(
                            "Unknown ceremony moment '{id}'"
                        )));
                    }
                }
                let mut moments = moments;
                // Required moments cannot be removed.
                ceremony::ensure_required(&mut moments);
                self.draft.ceremony_moments = moments;
                if first_person_name.is_some() {
                    self.draft.first_person_name = first_person_name;
                }
                if second_person_name.is_some() {
                    self.draft.second_person_name = second_person_name;
                }
            }
            StepAnswer::Cocktail(prefs) => {
                self.draft.cocktail = prefs;
            }
            StepAnswer::Date(date) => {
                self.draft.client.wedding_date = Some(date);
            }
            StepAnswer::Client(client) => {
                // The wedding date chosen at the date step survives a
                // client answer that does not carry one.
                let existing_date = self.draft.client.wedding_date;
                self.draft.client = client;
                if self.draft.client.wedding_date.is_none() {
                    self.draft.client.wedding_date = existing_date;
                }
            }
        }
        Ok(())
    }

    /// Advance to the next step if the current step's predicate holds.
    ///
    /// Entering the moments step force-includes the required moments;
    /// entering the cocktail step with nothing selected restores the
    /// all-selected default.
    pub fn advance(&mut self, ctx: &AvailabilityContext) -> Result<StepKind, CoreError> {
        step_complete(&self.draft, self.current, ctx)?;

        let pack = self.draft.pack.ok_or_else(|| {
            CoreError::Validation("Select a pack to continue".to_string())
        })?;
        let next = next_step(pack, self.current).ok_or_else(|| {
            CoreError::Validation("Already at the final step".to_string())
        })?;

        match next {
            StepKind::CeremonyMoments => {
                ceremony::ensure_required(&mut self.draft.ceremony_moments);
            }
            StepKind::CocktailPreferences => {
                if self.draft.cocktail.selected_styles.is_empty() {
                    self.draft.cocktail = CocktailPreferences::default();
                }
            }
            _ => {}
        }

        self.current = next;
        Ok(next)
    }

    /// Step back to the pack's previous step, skipping steps the pack does
    /// not use. Returns `None` when already on the first step.
    pub fn back(&mut self) -> Option<StepKind> {
        let pack = self.draft.pack?;
        let prev = previous_step(pack, self.current)?;
        self.current = prev;
        Some(prev)
    }

    /// Check every predicate in the pack's sequence; submission is only
    /// allowed when all of them hold.
    pub fn ready_for_submission(&self, ctx: &AvailabilityContext) -> Result<(), CoreError> {
        draft_complete(&self.draft, ctx)
    }
}

/// Check every predicate in the draft's pack sequence.
///
/// Used both by the wizard's review step and by the server before
/// assembling a submission; nothing reaches the assembler otherwise.
pub fn draft_complete(draft: &BookingDraft, ctx: &AvailabilityContext) -> Result<(), CoreError> {
    let pack = draft
        .pack
        .ok_or_else(|| CoreError::Validation("Select a pack to continue".to_string()))?;
    for step in step_sequence(pack) {
        step_complete(draft, step, ctx)?;
    }
    Ok(())
}
