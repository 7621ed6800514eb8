//! Booking-specific error types.
//!
//! Every outcome of the reservation flow that is not a committed booking is
//! one of these. `SlotUnavailable` is the distinguished concurrency outcome:
//! callers see the same error whether the conflict was caught by the
//! fast-path overlap check or by the database exclusion constraint, so they
//! cannot (and need not) tell the two races apart. Retrying it with the same
//! dates will fail again; retrying with different dates is fine.

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, ListingId, StayRange, ValidationError,
};

/// Booking-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Malformed request: bad dates, impossible guest counts.
    Validation { field: String, message: String },

    /// Listing does not exist.
    ListingNotFound(ListingId),

    /// Listing exists but is not reservable in its current status.
    ListingNotBookable { listing_id: ListingId, status: String },

    /// Stay length violates the listing's min/max night bounds.
    InvalidStayLength {
        nights: u32,
        min: u32,
        max: Option<u32>,
    },

    /// Another active booking holds an overlapping date range.
    SlotUnavailable { listing_id: ListingId, stay: StayRange },

    /// Booking does not exist.
    NotFound(BookingId),

    /// Lifecycle transition not permitted from the current status.
    InvalidState { current: String, attempted: String },

    /// Storage layer failed; transient, retryable with backoff.
    StorageUnavailable(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn listing_not_found(listing_id: ListingId) -> Self {
        BookingError::ListingNotFound(listing_id)
    }

    pub fn listing_not_bookable(listing_id: ListingId, status: impl Into<String>) -> Self {
        BookingError::ListingNotBookable {
            listing_id,
            status: status.into(),
        }
    }

    pub fn invalid_stay_length(nights: u32, min: u32, max: Option<u32>) -> Self {
        BookingError::InvalidStayLength { nights, min, max }
    }

    pub fn slot_unavailable(listing_id: ListingId, stay: StayRange) -> Self {
        BookingError::SlotUnavailable { listing_id, stay }
    }

    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BookingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        BookingError::StorageUnavailable(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Validation { .. } => ErrorCode::ValidationFailed,
            BookingError::ListingNotFound(_) => ErrorCode::ListingNotFound,
            BookingError::ListingNotBookable { .. } => ErrorCode::ListingNotBookable,
            BookingError::InvalidStayLength { .. } => ErrorCode::InvalidStayLength,
            BookingError::SlotUnavailable { .. } => ErrorCode::SlotUnavailable,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            BookingError::StorageUnavailable(_) => ErrorCode::StorageUnavailable,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            BookingError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BookingError::ListingNotFound(id) => format!("Listing not found: {}", id),
            BookingError::ListingNotBookable { listing_id, status } => {
                format!("Listing {} is not bookable while {}", listing_id, status)
            }
            BookingError::InvalidStayLength { nights, min, max } => match max {
                Some(max) => format!(
                    "Stay of {} nights is outside the allowed range of {} to {} nights",
                    nights, min, max
                ),
                None => format!(
                    "Stay of {} nights is below the minimum of {} nights",
                    nights, min
                ),
            },
            BookingError::SlotUnavailable { listing_id, stay } => {
                format!("Listing {} is not available for {}", listing_id, stay)
            }
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::InvalidState { current, attempted } => {
                format!("Cannot {} booking in {} state", attempted, current)
            }
            BookingError::StorageUnavailable(msg) => format!("Storage unavailable: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry with backoff.
    ///
    /// `SlotUnavailable` is deliberately not retryable: the same dates will
    /// lose again. The caller has to pick different dates.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::StorageUnavailable(_))
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        BookingError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => BookingError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => BookingError::StorageUnavailable(err.to_string()),
        }
    }
}

impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
