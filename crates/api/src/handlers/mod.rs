pub mod bookings;
pub mod calendar;
pub mod configure;
pub mod songs;
