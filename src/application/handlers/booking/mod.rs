//! Booking command and query handlers.
//!
//! `CreateBookingHandler` is the sole write entrypoint for new reservations.
//! The rest are the thin lifecycle and read operations its collaborators
//! drive.

mod cancel_booking;
mod confirm_booking;
mod create_booking;
mod get_booking;
mod list_listing_bookings;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use confirm_booking::{ConfirmBookingCommand, ConfirmBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use list_listing_bookings::{ListListingBookingsHandler, ListListingBookingsQuery};
