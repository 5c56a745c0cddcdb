//! Cocktail style preferences.
//!
//! The cocktail is varied background music; all six styles start selected
//! and the user may deselect styles they dislike, down to a floor of three.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A cocktail music style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CocktailStyle {
    pub id: &'static str,
    pub name: &'static str,
}

/// The six known styles.
pub const STYLES: &[CocktailStyle] = &[
    CocktailStyle { id: "classical", name: "Classical" },
    CocktailStyle { id: "jazz", name: "Jazz" },
    CocktailStyle { id: "pop", name: "Pop" },
    CocktailStyle { id: "folk", name: "Folk" },
    CocktailStyle { id: "latin", name: "Latin" },
    CocktailStyle { id: "rock", name: "Rock" },
];

/// Minimum number of styles that must remain selected.
pub const MIN_SELECTED_STYLES: usize = 3;

/// Look up a style by id.
pub fn style(id: &str) -> Option<&'static CocktailStyle> {
    STYLES.iter().find(|s| s.id == id)
}

/// The user's cocktail preferences: selected styles plus a free-text comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocktailPreferences {
    pub selected_styles: BTreeSet<String>,
    pub comment: Option<String>,
}

impl Default for CocktailPreferences {
    /// All styles selected, no comment.
    fn default() -> Self {
        Self {
            selected_styles: STYLES.iter().map(|s| s.id.to_string()).collect(),
            comment: None,
        }
    }
}

impl CocktailPreferences {
    /// Toggle a style in or out of the selection.
    ///
    /// Deselecting is refused when it would drop the count below
    /// [`MIN_SELECTED_STYLES`]. An unknown style id is a validation error.
    pub fn toggle_style(&mut self, id: &str) -> Result<(), CoreError> {
        let s = style(id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown cocktail style '{id}'")))?;

        if self.selected_styles.contains(s.id) {
            if self.selected_styles.len() <= MIN_SELECTED_STYLES {
                return Err(CoreError::Validation(format!(
                    "At least {MIN_SELECTED_STYLES} cocktail styles must remain selected"
                )));
            }
            self.selected_styles.remove(s.id);
        } else {
            self.selected_styles.insert(s.id.to_string());
        }
        Ok(())
    }

    /// Whether the preferences satisfy the style floor.
    pub fn is_complete(&self) -> bool {
        self.selected_styles.len() >= MIN_SELECTED_STYLES
    }

    /// Validate the preferences for step completion.
    pub fn validate(&self) -> Result<(), CoreError> {
        for id in &self.selected_styles {
            if style(id).is_none() {
                return Err(CoreError::Validation(format!(
                    "Unknown cocktail style '{id}'"
                )));
            }
        }
        if !self.is_complete() {
            return Err(CoreError::Validation(format!(
                "At least {MIN_SELECTED_STYLES} cocktail styles must be selected, got {}",
                self.selected_styles.len()
            )));
        }
        Ok(())
    }
}
