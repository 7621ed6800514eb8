//! Half-open stay date range value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A stay as a half-open date interval `[check_in, check_out)`.
///
/// Check-out day is excluded: a guest checking out the morning another
/// checks in does not occupy the same night. Every availability decision in
/// the system, including the database exclusion constraint, uses these exact
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Creates a stay range, rejecting empty or inverted intervals.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::invalid_format(
                "check_out",
                format!("must be after check_in ({} >= {})", check_in, check_out),
            ));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay. At least 1 by construction.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// True when the two half-open intervals share at least one night.
    ///
    /// `a` and `b` overlap iff `a.check_in < b.check_out && b.check_in < a.check_out`.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// True when the stay begins before the given date.
    pub fn starts_before(&self, date: NaiveDate) -> bool {
        self.check_in < date
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}
