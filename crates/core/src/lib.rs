//! Serenata domain logic.
//!
//! Pure, I/O-free modules shared by the persistence and API layers:
//! service packs and pricing, the ceremony moment catalog, song selection
//! tracking, cocktail preferences, the booking configurator state machine,
//! the admin-side booking lifecycle, and submission assembly.

pub mod ceremony;
pub mod client;
pub mod cocktail;
pub mod configurator;
pub mod error;
pub mod lifecycle;
pub mod pack;
pub mod song_selection;
pub mod submission;
pub mod types;
