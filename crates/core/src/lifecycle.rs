//! The admin-side booking lifecycle state machine.
//!
//! Tracks a lead from first contact through realization or cancellation.
//! Transitions are table-driven: both the admin UI and the API route
//! through [`validate_transition`], so the allowed-next set is defined in
//! exactly one place. The happy path advances strictly one step at a time;
//! cancellation is reachable from every non-terminal state. The booking's
//! visibility flag is orthogonal and never consulted here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle stage of a lead/booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    #[serde(rename = "CONTACTED")]
    Contacted,
    #[serde(rename = "NEGOTIATING")]
    Negotiating,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "REALIZED")]
    Realized,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// State assigned to a freshly submitted booking.
pub const INITIAL_STATE: LifecycleState = LifecycleState::Contacted;

impl LifecycleState {
    /// Parse a state string from the database or an API payload.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "CONTACTED" => Ok(Self::Contacted),
            "NEGOTIATING" => Ok(Self::Negotiating),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PAID" => Ok(Self::Paid),
            "REALIZED" => Ok(Self::Realized),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid lifecycle state '{s}'. Must be one of: CONTACTED, \
                 NEGOTIATING, CONFIRMED, PAID, REALIZED, CANCELLED"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacted => "CONTACTED",
            Self::Negotiating => "NEGOTIATING",
            Self::Confirmed => "CONFIRMED",
            Self::Paid => "PAID",
            Self::Realized => "REALIZED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// The states reachable from this one in a single operator action.
    pub fn allowed_next(&self) -> &'static [LifecycleState] {
        match self {
            Self::Contacted => &[Self::Negotiating, Self::Cancelled],
            Self::Negotiating => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Paid, Self::Cancelled],
            Self::Paid => &[Self::Realized, Self::Cancelled],
            Self::Realized => &[],
            Self::Cancelled => &[],
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Whether a final price may be attached (at or after confirmation).
    pub fn allows_final_price(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Paid | Self::Realized)
    }
}

/// Validate a requested transition against the allowed-next table.
///
/// The stored state is never modified here; callers perform the write only
/// after this check passes, conditioned on the expected current state.
pub fn validate_transition(
    current: LifecycleState,
    requested: LifecycleState,
) -> Result<(), CoreError> {
    if current.allowed_next().contains(&requested) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: current.as_str(),
            requested: requested.as_str(),
        })
    }
}
