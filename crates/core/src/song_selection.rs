//! Per-draft song selection tracking with duplicate detection.
//!
//! Each selected ceremony moment gets one song: either a catalogue song
//! (opaque id) or a custom song entered ad hoc. Assigning the same
//! catalogue song to two moments is a real user error (the same entrance
//! song twice) but not worth blocking keystroke-by-keystroke; the tracker
//! records the assignment anyway and surfaces an advisory warning. The
//! duplicate only blocks completion of the song selection step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How long the duplicate warning stays visible before self-clearing.
pub const DUPLICATE_WARNING_SECS: u64 = 5;

/// A song assigned to a ceremony moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SongReference {
    /// A song from the catalogue, by opaque id.
    Catalog { song_id: String },
    /// A custom song registered on this draft, by synthetic id.
    Custom { custom_id: String },
}

impl SongReference {
    /// The catalogue song id, if this is a catalogue reference.
    pub fn catalog_id(&self) -> Option<&str> {
        match self {
            Self::Catalog { song_id } => Some(song_id),
            Self::Custom { .. } => None,
        }
    }
}

/// A custom song entered during configuration, scoped to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSong {
    /// Synthetic draft-scoped id (`custom_1`, `custom_2`, ...).
    pub id: String,
    pub title: String,
    pub source_url: Option<String>,
}

/// Advisory warning produced when a catalogue song is assigned twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateWarning {
    /// The other moment already holding the same catalogue song.
    pub conflicting_moment_id: String,
    pub song_id: String,
}

/// Tracks moment-to-song assignments and draft-scoped custom songs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSelectionTracker {
    selections: BTreeMap<String, SongReference>,
    custom_songs: Vec<CustomSong>,
    next_custom_id: u32,
}

impl SongSelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the selection for a moment.
    ///
    /// Returns a [`DuplicateWarning`] naming the conflicting moment when the
    /// same catalogue song is already assigned elsewhere. The assignment is
    /// recorded either way; the warning is advisory and does not revert it.
    pub fn assign(&mut self, moment_id: &str, song: SongReference) -> Option<DuplicateWarning> {
        let warning = song.catalog_id().and_then(|song_id| {
            self.selections
                .iter()
                .find(|(other_moment, other_song)| {
                    other_moment.as_str() != moment_id
                        && other_song.catalog_id() == Some(song_id)
                })
                .map(|(other_moment, _)| DuplicateWarning {
                    conflicting_moment_id: other_moment.clone(),
                    song_id: song_id.to_string(),
                })
        });

        self.selections.insert(moment_id.to_string(), song);
        warning
    }

    /// Register a custom song on the draft, returning its synthetic id.
    pub fn add_custom_song(&mut self, title: String, source_url: Option<String>) -> String {
        self.next_custom_id += 1;
        let id = format!("custom_{}", self.next_custom_id);
        self.custom_songs.push(CustomSong {
            id: id.clone(),
            title,
            source_url,
        });
        id
    }

    /// Remove the selection for a moment, if any.
    pub fn clear(&mut self, moment_id: &str) {
        self.selections.remove(moment_id);
    }

    /// The selection for a moment, if any.
    pub fn selection(&self, moment_id: &str) -> Option<&SongReference> {
        self.selections.get(moment_id)
    }

    /// All custom songs, in entry order.
    pub fn custom_songs(&self) -> &[CustomSong] {
        &self.custom_songs
    }

    /// The moment id (if any) whose selection references the given custom song.
    pub fn moment_for_custom(&self, custom_id: &str) -> Option<&str> {
        self.selections
            .iter()
            .find(|(_, song)| matches!(song, SongReference::Custom { custom_id: c } if c == custom_id))
            .map(|(moment, _)| moment.as_str())
    }

    /// True iff every given moment id has a selection.
    pub fn is_complete<'a>(&self, moment_ids: impl IntoIterator<Item = &'a str>) -> bool {
        moment_ids
            .into_iter()
            .all(|id| self.selections.contains_key(id))
    }

    /// True iff two or more moments resolve to the same catalogue song.
    ///
    /// Custom songs have synthetic unique ids and can never collide.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.selections
            .values()
            .filter_map(SongReference::catalog_id)
            .any(|id| !seen.insert(id))
    }

    /// Iterate over `(moment_id, selection)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SongReference)> {
        self.selections.iter()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
