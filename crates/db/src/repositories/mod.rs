//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that participate in the submission transaction accept any
//! `PgExecutor` so they can run against either the pool or an open
//! transaction; the rest take `&PgPool` directly.

pub mod booking_repo;
pub mod client_repo;
pub mod selection_repo;
pub mod song_repo;

pub use booking_repo::BookingRepo;
pub use client_repo::ClientRepo;
pub use selection_repo::SelectionRepo;
pub use song_repo::SongRepo;
