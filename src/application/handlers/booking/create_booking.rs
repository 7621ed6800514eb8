//! CreateBookingHandler - the reservation write path.
//!
//! This is the only place bookings are created. The flow is deliberately
//! check-then-insert with the insert protected by the storage exclusion
//! guarantee: the application-level overlap check exists to reject the
//! common case cheaply, and the constraint decides the race when two
//! requests slip past it simultaneously. Both outcomes surface as the same
//! `SlotUnavailable`, so callers cannot tell which layer rejected them.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::booking::{Booking, BookingError, BookingStatus, GuestCounts};
use crate::domain::foundation::{BookingId, GuestId, ListingId, StayRange};
use crate::domain::pricing::{price_stay, PriceBreakdown};
use crate::ports::{
    BookingRepository, Clock, CouponResolution, DiscountResolver, ListingReader, RepositoryError,
};

/// Command to reserve a stay.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub listing_id: ListingId,
    pub guest_id: GuestId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub coupon_code: Option<String>,
}

/// Result of a committed reservation.
#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,
    pub breakdown: PriceBreakdown,
}

/// Handler for creating bookings.
pub struct CreateBookingHandler {
    listings: Arc<dyn ListingReader>,
    bookings: Arc<dyn BookingRepository>,
    discounts: Arc<dyn DiscountResolver>,
    clock: Arc<dyn Clock>,
}

impl CreateBookingHandler {
    pub fn new(
        listings: Arc<dyn ListingReader>,
        bookings: Arc<dyn BookingRepository>,
        discounts: Arc<dyn DiscountResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            listings,
            bookings,
            discounts,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Load the listing and check it can be reserved at all
        let listing = self
            .listings
            .get_listing(&cmd.listing_id)
            .await
            .map_err(|e| BookingError::storage_unavailable(e.to_string()))?
            .ok_or(BookingError::ListingNotFound(cmd.listing_id))?;

        if !listing.is_bookable() {
            return Err(BookingError::listing_not_bookable(
                listing.id,
                listing.status.to_string(),
            ));
        }

        // 2. Validate request shape
        let stay = StayRange::new(cmd.check_in, cmd.check_out)?;
        let guests = GuestCounts::new(cmd.adults, cmd.children, cmd.infants)?;

        let today = self.clock.now().date();
        if stay.starts_before(today) {
            return Err(BookingError::validation(
                "check_in",
                format!("{} is in the past", cmd.check_in),
            ));
        }

        // 3. Fast-path availability check; saves a doomed transaction in
        //    the common case, decides nothing under contention
        let conflict = self
            .bookings
            .check_overlap(&listing.id, &stay)
            .await
            .map_err(map_infrastructure_error)?;
        if conflict {
            return Err(BookingError::slot_unavailable(listing.id, stay));
        }

        // 4. Resolve the coupon and price the stay
        let discount = match &cmd.coupon_code {
            Some(code) => match self
                .discounts
                .resolve(code)
                .await
                .map_err(|e| BookingError::storage_unavailable(e.to_string()))?
            {
                CouponResolution::Valid { discount } => discount,
                CouponResolution::Invalid { reason } => {
                    return Err(BookingError::validation("coupon_code", reason));
                }
            },
            None => Decimal::ZERO,
        };

        let breakdown = price_stay(&listing, stay.nights(), discount)?;

        // 5. Instant-book listings confirm immediately
        let status = if listing.booking_mode.is_instant() {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        };

        let booking = Booking::create(
            BookingId::new(),
            listing.id,
            cmd.guest_id,
            stay,
            guests,
            breakdown.total,
            breakdown.payout,
            breakdown.currency.clone(),
            status,
        );

        // 6. Commit. A SlotTaken here is the real race the fast path
        //    missed; callers see the same rejection either way.
        match self.bookings.insert_booking(&booking).await {
            Ok(()) => {}
            Err(RepositoryError::SlotTaken) => {
                return Err(BookingError::slot_unavailable(listing.id, stay));
            }
            Err(e) => return Err(map_infrastructure_error(e)),
        }

        tracing::info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            stay = %booking.stay,
            status = %booking.status,
            "booking committed"
        );

        Ok(CreateBookingResult { booking, breakdown })
    }
}

fn map_infrastructure_error(err: RepositoryError) -> BookingError {
    match err {
        // The insert site handles SlotTaken with its own context; reaching
        // this arm from any other call is an infrastructure problem.
        RepositoryError::SlotTaken => {
            BookingError::storage_unavailable("unexpected exclusion rejection")
        }
        RepositoryError::NotFound(id) => BookingError::not_found(id),
        RepositoryError::Unavailable(msg) => BookingError::storage_unavailable(msg),
        RepositoryError::Corrupt(msg) => BookingError::storage_unavailable(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::{
        InMemoryBookingRepository, InMemoryDiscountResolver, InMemoryListingReader,
    };
    use crate::domain::foundation::{Currency, HostId, Timestamp};
    use crate::domain::listing::{BookingMode, Listing, ListingStatus};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Clock pinned well before every stay used in these tests.
    fn test_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at(Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        )))
    }

    fn test_listing(mode: BookingMode) -> Listing {
        Listing {
            id: ListingId::new(),
            host_id: HostId::new(),
            status: ListingStatus::Active,
            booking_mode: mode,
            base_price: dec!(100.00),
            cleaning_fee: dec!(30.00),
            service_fee_percent: Some(dec!(10)),
            security_deposit: dec!(0.00),
            currency: Currency::usd(),
            min_stay_nights: 2,
            max_stay_nights: Some(30),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    struct Fixture {
        bookings: Arc<InMemoryBookingRepository>,
        discounts: Arc<InMemoryDiscountResolver>,
        handler: CreateBookingHandler,
    }

    async fn fixture_with(listing: &Listing) -> Fixture {
        let listings = Arc::new(InMemoryListingReader::new());
        listings.put(listing.clone()).await;
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let discounts = Arc::new(InMemoryDiscountResolver::new());
        let handler = CreateBookingHandler::new(
            listings,
            bookings.clone(),
            discounts.clone(),
            test_clock(),
        );
        Fixture {
            bookings,
            discounts,
            handler,
        }
    }

    fn command(listing_id: ListingId, check_in: NaiveDate, check_out: NaiveDate) -> CreateBookingCommand {
        CreateBookingCommand {
            listing_id,
            guest_id: GuestId::new(),
            check_in,
            check_out,
            adults: 2,
            children: 0,
            infants: 0,
            coupon_code: None,
        }
    }

    #[tokio::test]
    async fn creates_pending_booking_for_request_mode() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let result = f
            .handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap();

        assert_eq!(result.booking.status, BookingStatus::Pending);
        assert_eq!(result.booking.nights(), 4);
        // 4 * 100 + 30 cleaning + 40 service
        assert_eq!(result.booking.total_amount, dec!(470.00));
        assert_eq!(f.bookings.len().await, 1);
    }

    #[tokio::test]
    async fn instant_mode_confirms_immediately() {
        let listing = test_listing(BookingMode::Instant);
        let f = fixture_with(&listing).await;

        let result = f
            .handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap();

        assert_eq!(result.booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let other = ListingId::new();
        let err = f
            .handler
            .handle(command(other, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::ListingNotFound(id) if id == other));
    }

    #[tokio::test]
    async fn suspended_listing_is_not_bookable() {
        let mut listing = test_listing(BookingMode::Request);
        listing.status = ListingStatus::Suspended;
        let f = fixture_with(&listing).await;

        let err = f
            .handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::ListingNotBookable { .. }));
        assert!(f.bookings.is_empty().await);
    }

    #[tokio::test]
    async fn inverted_dates_fail_validation() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let err = f
            .handler
            .handle(command(listing.id, date(2025, 6, 5), date(2025, 6, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation { .. }));
    }

    #[tokio::test]
    async fn past_check_in_fails_validation() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let err = f
            .handler
            .handle(command(listing.id, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BookingError::Validation { ref field, .. } if field == "check_in"
        ));
    }

    #[tokio::test]
    async fn zero_adults_fails_validation() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let mut cmd = command(listing.id, date(2025, 6, 1), date(2025, 6, 5));
        cmd.adults = 0;
        cmd.children = 2;

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
    }

    #[tokio::test]
    async fn short_stay_is_rejected_with_stay_length() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let err = f
            .handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 2)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BookingError::InvalidStayLength { nights: 1, min: 2, .. }
        ));
    }

    #[tokio::test]
    async fn overlapping_stay_is_slot_unavailable() {
        let listing = test_listing(BookingMode::Instant);
        let f = fixture_with(&listing).await;

        f.handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap();

        let err = f
            .handler
            .handle(command(listing.id, date(2025, 6, 3), date(2025, 6, 7)))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
        assert_eq!(f.bookings.len().await, 1);
    }

    #[tokio::test]
    async fn adjacent_stays_both_succeed() {
        let listing = test_listing(BookingMode::Instant);
        let f = fixture_with(&listing).await;

        f.handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap();
        f.handler
            .handle(command(listing.id, date(2025, 6, 5), date(2025, 6, 10)))
            .await
            .unwrap();

        assert_eq!(f.bookings.len().await, 2);
    }

    #[tokio::test]
    async fn valid_coupon_reduces_total() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;
        f.discounts.put("WELCOME50", dec!(50.00)).await;

        let mut cmd = command(listing.id, date(2025, 6, 1), date(2025, 6, 5));
        cmd.coupon_code = Some("WELCOME50".to_string());

        let result = f.handler.handle(cmd).await.unwrap();
        assert_eq!(result.breakdown.discount_amount, dec!(50.00));
        assert_eq!(result.booking.total_amount, dec!(420.00));
    }

    #[tokio::test]
    async fn unknown_coupon_fails_validation() {
        let listing = test_listing(BookingMode::Request);
        let f = fixture_with(&listing).await;

        let mut cmd = command(listing.id, date(2025, 6, 1), date(2025, 6, 5));
        cmd.coupon_code = Some("BOGUS".to_string());

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation { ref field, .. } if field == "coupon_code"
        ));
        assert!(f.bookings.is_empty().await);
    }

    // ════════════════════════════════════════════════════════════════════
    // Failure-path mocks
    // ════════════════════════════════════════════════════════════════════

    /// Repository whose fast path sees no conflict but whose insert loses
    /// the race: the two-layer scenario the design exists for.
    struct RacingBookingRepository;

    #[async_trait]
    impl BookingRepository for RacingBookingRepository {
        async fn check_overlap(
            &self,
            _listing_id: &ListingId,
            _stay: &StayRange,
        ) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        async fn insert_booking(&self, _booking: &Booking) -> Result<(), RepositoryError> {
            Err(RepositoryError::SlotTaken)
        }

        async fn update_status(
            &self,
            _id: &BookingId,
            _status: BookingStatus,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
            Ok(None)
        }

        async fn find_for_listing(
            &self,
            _listing_id: &ListingId,
        ) -> Result<Vec<Booking>, RepositoryError> {
            Ok(vec![])
        }
    }

    /// Repository that is down entirely.
    struct UnavailableBookingRepository;

    #[async_trait]
    impl BookingRepository for UnavailableBookingRepository {
        async fn check_overlap(
            &self,
            _listing_id: &ListingId,
            _stay: &StayRange,
        ) -> Result<bool, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        async fn insert_booking(&self, _booking: &Booking) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        async fn update_status(
            &self,
            _id: &BookingId,
            _status: BookingStatus,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_id(&self, _id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        async fn find_for_listing(
            &self,
            _listing_id: &ListingId,
        ) -> Result<Vec<Booking>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn losing_the_insert_race_reads_as_slot_unavailable() {
        let listing = test_listing(BookingMode::Instant);
        let listings = Arc::new(InMemoryListingReader::new());
        listings.put(listing.clone()).await;

        let handler = CreateBookingHandler::new(
            listings,
            Arc::new(RacingBookingRepository),
            Arc::new(InMemoryDiscountResolver::new()),
            test_clock(),
        );

        let err = handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap_err();

        // Indistinguishable from the fast-path rejection, and not retryable
        // with the same dates.
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn storage_outage_reads_as_storage_unavailable() {
        let listing = test_listing(BookingMode::Instant);
        let listings = Arc::new(InMemoryListingReader::new());
        listings.put(listing.clone()).await;

        let handler = CreateBookingHandler::new(
            listings,
            Arc::new(UnavailableBookingRepository),
            Arc::new(InMemoryDiscountResolver::new()),
            test_clock(),
        );

        let err = handler
            .handle(command(listing.id, date(2025, 6, 1), date(2025, 6, 5)))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::StorageUnavailable(_)));
        assert!(err.is_retryable());
    }
}
