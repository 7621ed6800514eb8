//! Booking domain - reserved stays and their lifecycle.

mod aggregate;
mod errors;
mod guest_counts;
mod status;

pub use aggregate::Booking;
pub use errors::BookingError;
pub use guest_counts::GuestCounts;
pub use status::{BookingStatus, PaymentStatus};
