//! PostgreSQL implementation of ListingReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    Currency, DomainError, ErrorCode, HostId, ListingId, Timestamp,
};
use crate::domain::listing::{BookingMode, Listing, ListingStatus};
use crate::ports::ListingReader;

/// PostgreSQL implementation of the ListingReader port.
pub struct PostgresListingReader {
    pool: PgPool,
}

impl PostgresListingReader {
    /// Creates a new PostgresListingReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a listing.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    host_id: Uuid,
    status: String,
    booking_mode: String,
    base_price: Decimal,
    cleaning_fee: Decimal,
    service_fee_percent: Option<Decimal>,
    security_deposit: Decimal,
    currency: String,
    min_stay_nights: i32,
    max_stay_nights: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = DomainError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let booking_mode = parse_booking_mode(&row.booking_mode)?;
        let currency = Currency::new(row.currency.trim()).map_err(|e| {
            DomainError::new(ErrorCode::StorageUnavailable, format!("Invalid currency: {}", e))
        })?;

        Ok(Listing {
            id: ListingId::from_uuid(row.id),
            host_id: HostId::from_uuid(row.host_id),
            status,
            booking_mode,
            base_price: row.base_price,
            cleaning_fee: row.cleaning_fee,
            service_fee_percent: row.service_fee_percent,
            security_deposit: row.security_deposit,
            currency,
            min_stay_nights: row.min_stay_nights.max(1) as u32,
            max_stay_nights: row.max_stay_nights.map(|n| n as u32),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<ListingStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "draft" => Ok(ListingStatus::Draft),
        "active" => Ok(ListingStatus::Active),
        "suspended" => Ok(ListingStatus::Suspended),
        _ => Err(DomainError::new(
            ErrorCode::StorageUnavailable,
            format!("Invalid listing status value: {}", s),
        )),
    }
}

fn parse_booking_mode(s: &str) -> Result<BookingMode, DomainError> {
    match s.to_lowercase().as_str() {
        "instant" => Ok(BookingMode::Instant),
        "request" => Ok(BookingMode::Request),
        _ => Err(DomainError::new(
            ErrorCode::StorageUnavailable,
            format!("Invalid booking mode value: {}", s),
        )),
    }
}

#[async_trait]
impl ListingReader for PostgresListingReader {
    async fn get_listing(&self, id: &ListingId) -> Result<Option<Listing>, DomainError> {
        let row: Option<ListingRow> = sqlx::query_as(
            r#"
            SELECT id, host_id, status, booking_mode, base_price, cleaning_fee,
                   service_fee_percent, security_deposit, currency,
                   min_stay_nights, max_stay_nights, created_at, updated_at
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageUnavailable,
                format!("Failed to load listing: {}", e),
            )
        })?;

        row.map(Listing::try_from).transpose()
    }
}
