//! The fixed catalogue of ceremony moments.
//!
//! Seven named junctures in a wedding ceremony eligible for a music
//! assignment. The two entrance moments and the exit are required and
//! cannot be deselected; the other four are optional. The entrance moments
//! can carry a personalized display name built from the person entering.

use std::collections::BTreeSet;

use crate::error::CoreError;

/// A named juncture in the ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeremonyMoment {
    pub id: &'static str,
    pub name: &'static str,
    pub required: bool,
}

/// Moment id for the first entrance (personalizable).
pub const FIRST_ENTRANCE: &str = "first_entrance";

/// Moment id for the second entrance (personalizable).
pub const SECOND_ENTRANCE: &str = "second_entrance";

/// Moment id for the exit.
pub const EXIT: &str = "exit";

/// The full moment catalogue, in ceremony order.
pub const MOMENTS: &[CeremonyMoment] = &[
    CeremonyMoment { id: FIRST_ENTRANCE, name: "First entrance", required: true },
    CeremonyMoment { id: SECOND_ENTRANCE, name: "Second entrance", required: true },
    CeremonyMoment { id: "communion", name: "Communion", required: false },
    CeremonyMoment { id: "pauses", name: "Pauses", required: false },
    CeremonyMoment { id: "rings", name: "Rings", required: false },
    CeremonyMoment { id: "speeches", name: "Speeches", required: false },
    CeremonyMoment { id: EXIT, name: "Exit", required: true },
];

/// Look up a moment by id.
pub fn moment(id: &str) -> Option<&'static CeremonyMoment> {
    MOMENTS.iter().find(|m| m.id == id)
}

/// Ids of all required moments, in ceremony order.
pub fn required_moment_ids() -> Vec<&'static str> {
    MOMENTS.iter().filter(|m| m.required).map(|m| m.id).collect()
}

/// Whether every required moment is present in the selection.
pub fn has_required(selected: &BTreeSet<String>) -> bool {
    MOMENTS
        .iter()
        .filter(|m| m.required)
        .all(|m| selected.contains(m.id))
}

/// Force-include all required moments into a selection.
///
/// Called on entry to the moments step so the user starts from a valid set.
pub fn ensure_required(selected: &mut BTreeSet<String>) {
    for m in MOMENTS.iter().filter(|m| m.required) {
        selected.insert(m.id.to_string());
    }
}

/// Toggle an optional moment in or out of the selection.
///
/// Deselecting a required moment is a no-op. An unknown moment id is a
/// validation error.
pub fn toggle_moment(selected: &mut BTreeSet<String>, id: &str) -> Result<(), CoreError> {
    let m = moment(id).ok_or_else(|| {
        CoreError::Validation(format!("Unknown ceremony moment '{id}'"))
    })?;

    if selected.contains(id) {
        if !m.required {
            selected.remove(id);
        }
    } else {
        selected.insert(id.to_string());
    }
    Ok(())
}

/// Display name for a moment, personalized for the two entrance moments.
///
/// `first_person` and `second_person` are the free-text names entered by the
/// user; when present they replace the generic entrance labels.
pub fn display_name(id: &str, first_person: Option<&str>, second_person: Option<&str>) -> String {
    match (id, first_person, second_person) {
        (FIRST_ENTRANCE, Some(name), _) if !name.trim().is_empty() => {
            format!("Entrance of {}", name.trim())
        }
        (SECOND_ENTRANCE, _, Some(name)) if !name.trim().is_empty() => {
            format!("Entrance of {}", name.trim())
        }
        _ => moment(id).map(|m| m.name.to_string()).unwrap_or_else(|| id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn catalogue_has_seven_moments_three_required() {
        assert_eq!(MOMENTS.len(), 7);
        assert_eq!(required_moment_ids(), vec![FIRST_ENTRANCE, SECOND_ENTRANCE, EXIT]);
    }

    #[test]
    fn has_required_detects_missing_exit() {
        let mut selected = set(&[FIRST_ENTRANCE, SECOND_ENTRANCE, EXIT, "rings"]);
        assert!(has_required(&selected));
        selected.remove(EXIT);
        assert!(!has_required(&selected));
    }

    #[test]
    fn ensure_required_completes_the_set() {
        let mut selected = set(&["communion"]);
        ensure_required(&mut selected);
        assert!(has_required(&selected));
        assert!(selected.contains("communion"));
    }

    #[test]
    fn toggle_adds_and_removes_optional_moments() {
        let mut selected = set(&[FIRST_ENTRANCE, SECOND_ENTRANCE, EXIT]);
        toggle_moment(&mut selected, "rings").unwrap();
        assert!(selected.contains("rings"));
        toggle_moment(&mut selected, "rings").unwrap();
        assert!(!selected.contains("rings"));
    }

    #[test]
    fn toggle_required_moment_is_noop() {
        let mut selected = set(&[FIRST_ENTRANCE, SECOND_ENTRANCE, EXIT]);
        toggle_moment(&mut selected, EXIT).unwrap();
        assert!(selected.contains(EXIT));
    }

    #[test]
    fn toggle_unknown_moment_rejected() {
        let mut selected = BTreeSet::new();
        assert!(toggle_moment(&mut selected, "confetti").is_err());
    }

    #[test]
    fn entrance_names_are_personalized() {
        assert_eq!(
            display_name(FIRST_ENTRANCE, Some("Marta"), None),
            "Entrance of Marta"
        );
        assert_eq!(
            display_name(SECOND_ENTRANCE, Some("Marta"), Some("Jon")),
            "Entrance of Jon"
        );
        assert_eq!(display_name(FIRST_ENTRANCE, None, None), "First entrance");
        assert_eq!(display_name(EXIT, Some("Marta"), Some("Jon")), "Exit");
    }

    #[test]
    fn blank_person_name_falls_back_to_generic_label() {
        assert_eq!(display_name(FIRST_ENTRANCE, Some("   "), None), "First entrance");
    }
}
