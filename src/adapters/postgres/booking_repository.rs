//! PostgreSQL implementation of BookingRepository.
//!
//! The availability invariant is enforced by the `bookings_no_overlap`
//! exclusion constraint declared in `migrations/0002_create_bookings.sql`:
//!
//! ```sql
//! EXCLUDE USING gist (listing_id WITH =, daterange(check_in, check_out) WITH &&)
//!     WHERE (status IN ('pending', 'confirmed'))
//! ```
//!
//! `check_overlap` below re-states the same predicate in plain SQL for the
//! fast path. The two must stay logically identical: half-open interval
//! semantics (`check_in < other.check_out AND other.check_in < check_out`,
//! matching daterange's default `[)` bounds) and the same active-status set.
//! If they drift, the fast path produces confusing (though not unsafe)
//! rejections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus, GuestCounts, PaymentStatus};
use crate::domain::foundation::{BookingId, Currency, GuestId, ListingId, StayRange, Timestamp};
use crate::ports::{BookingRepository, RepositoryError};

/// Name of the exclusion constraint backing the availability invariant.
pub const NO_OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

/// PostgreSQL implementation of the BookingRepository port.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Creates a new PostgresBookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    listing_id: Uuid,
    guest_id: Uuid,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
    adults: i32,
    children: i32,
    infants: i32,
    total_amount: Decimal,
    payout_amount: Decimal,
    currency: String,
    status: String,
    payment_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let stay = StayRange::new(row.check_in, row.check_out)
            .map_err(|e| RepositoryError::Corrupt(format!("invalid stay range: {}", e)))?;
        let guests = GuestCounts::new(row.adults as u32, row.children as u32, row.infants as u32)
            .map_err(|e| RepositoryError::Corrupt(format!("invalid guest counts: {}", e)))?;
        let currency = Currency::new(row.currency.trim())
            .map_err(|e| RepositoryError::Corrupt(format!("invalid currency: {}", e)))?;
        let status = parse_status(&row.status)?;
        let payment_status = parse_payment_status(&row.payment_status)?;

        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            listing_id: ListingId::from_uuid(row.listing_id),
            guest_id: GuestId::from_uuid(row.guest_id),
            stay,
            guests,
            total_amount: row.total_amount,
            payout_amount: row.payout_amount,
            currency,
            status,
            payment_status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

fn parse_status(s: &str) -> Result<BookingStatus, RepositoryError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        _ => Err(RepositoryError::Corrupt(format!(
            "invalid booking status value: {}",
            s
        ))),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, RepositoryError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(PaymentStatus::Pending),
        "captured" => Ok(PaymentStatus::Captured),
        "refunded" => Ok(PaymentStatus::Refunded),
        _ => Err(RepositoryError::Corrupt(format!(
            "invalid payment status value: {}",
            s
        ))),
    }
}

fn status_to_string(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Completed => "completed",
    }
}

fn payment_status_to_string(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Captured => "captured",
        PaymentStatus::Refunded => "refunded",
    }
}

const SELECT_BOOKING: &str = r#"
    SELECT id, listing_id, guest_id, check_in, check_out, adults, children,
           infants, total_amount, payout_amount, currency, status,
           payment_status, created_at, updated_at, cancelled_at
    FROM bookings
"#;

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn check_overlap(
        &self,
        listing_id: &ListingId,
        stay: &StayRange,
    ) -> Result<bool, RepositoryError> {
        // Same predicate as the exclusion constraint: half-open ranges,
        // active statuses only.
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE listing_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND check_in < $3
                  AND $2 < check_out
            )
            "#,
        )
        .bind(listing_id.as_uuid())
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Unavailable(format!("overlap check failed: {}", e)))?;

        Ok(exists)
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, listing_id, guest_id, check_in, check_out, nights,
                adults, children, infants, total_amount, payout_amount,
                currency, status, payment_status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.listing_id.as_uuid())
        .bind(booking.guest_id.as_uuid())
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.nights() as i32)
        .bind(booking.guests.adults() as i32)
        .bind(booking.guests.children() as i32)
        .bind(booking.guests.infants() as i32)
        .bind(booking.total_amount)
        .bind(booking.payout_amount)
        .bind(booking.currency.as_str())
        .bind(status_to_string(booking.status))
        .bind(payment_status_to_string(booking.payment_status))
        .bind(booking.created_at.as_datetime())
        .bind(booking.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(NO_OVERLAP_CONSTRAINT) {
                    tracing::info!(
                        booking_id = %booking.id,
                        listing_id = %booking.listing_id,
                        stay = %booking.stay,
                        "insert lost availability race to a concurrent booking"
                    );
                    return RepositoryError::SlotTaken;
                }
            }
            RepositoryError::Unavailable(format!("Failed to insert booking: {}", e))
        })?;

        Ok(())
    }

    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2,
                cancelled_at = CASE WHEN $2 = 'cancelled' THEN now() ELSE cancelled_at END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status_to_string(status))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Unavailable(format!("Failed to update booking: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(*id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_BOOKING))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Unavailable(format!("Failed to load booking: {}", e))
                })?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{} WHERE listing_id = $1 ORDER BY check_in ASC",
            SELECT_BOOKING
        ))
        .bind(listing_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Unavailable(format!("Failed to list bookings: {}", e)))?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}
