//! Booking service: validation, hotel-scoped authorization, repository calls.
//!
//! Within a single call the order is fixed:
//!
//! ```text
//! validate payload (create only)
//!   ↓
//! authorize identity against the hotel scope
//!   ↓
//! repository call (raced against the request scope)
//! ```
//!
//! Storage failures of every kind surface as [`DomainError::Database`]; the
//! underlying cause is logged here and never returned.

use async_trait::async_trait;
use tracing::instrument;

use hotelbook_auth::{User, authorize_booking_write, require_identity};
use hotelbook_core::{DomainError, DomainResult, new_booking_id};

use crate::{Booking, BookingRepository, Listing, RepositoryError, RequestScope};

/// Operations on bookings, scoped to the caller's hotel.
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list_bookings(&self, scope: &RequestScope, user: Option<&User>) -> DomainResult<Listing>;

    async fn create_booking(
        &self,
        scope: &RequestScope,
        user: Option<&User>,
        booking: Booking,
    ) -> DomainResult<Booking>;

    async fn get_booking_by_id(
        &self,
        scope: &RequestScope,
        user: Option<&User>,
        id: &str,
    ) -> DomainResult<Booking>;
}

/// [`BookingService`] backed by a [`BookingRepository`].
///
/// Holds nothing but the repository, so it can be shared across requests freely.
#[derive(Debug, Clone)]
pub struct HotelBookingService<R> {
    repo: R,
}

impl<R: BookingRepository> HotelBookingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: BookingRepository> BookingService for HotelBookingService<R> {
    #[instrument(skip_all, fields(hotel_id = user.map(|u| u.hotel_id().get())))]
    async fn list_bookings(&self, scope: &RequestScope, user: Option<&User>) -> DomainResult<Listing> {
        let user = require_identity(user).map_err(|_| DomainError::Unauthorized)?;

        let data = scope
            .run(self.repo.list(user.hotel_id()))
            .await
            .map_err(|e| storage_failure("list", e))?;

        Ok(Listing::from(data))
    }

    #[instrument(skip_all, fields(hotel_id = booking.hotel_id.get()))]
    async fn create_booking(
        &self,
        scope: &RequestScope,
        user: Option<&User>,
        mut booking: Booking,
    ) -> DomainResult<Booking> {
        if !booking.is_valid_for_create() {
            return Err(DomainError::InvalidBooking);
        }

        authorize_booking_write(user, booking.hotel_id).map_err(|e| {
            tracing::debug!(reason = %e, "booking creation refused");
            DomainError::Unauthorized
        })?;

        booking.id = new_booking_id();

        scope
            .run(self.repo.insert(&booking))
            .await
            .map_err(|e| storage_failure("insert", e))?;

        tracing::info!(booking_id = %booking.id, "booking created");
        Ok(booking)
    }

    #[instrument(skip_all, fields(hotel_id = user.map(|u| u.hotel_id().get()), booking_id = id))]
    async fn get_booking_by_id(
        &self,
        scope: &RequestScope,
        user: Option<&User>,
        id: &str,
    ) -> DomainResult<Booking> {
        let user = require_identity(user).map_err(|_| DomainError::Unauthorized)?;

        scope
            .run(self.repo.find_by_id_and_hotel(user.hotel_id(), id))
            .await
            .map_err(|e| storage_failure("find_by_id_and_hotel", e))?
            .ok_or_else(DomainError::not_found)
    }
}

fn storage_failure(operation: &'static str, err: RepositoryError) -> DomainError {
    match err {
        RepositoryError::Cancelled | RepositoryError::DeadlineExceeded => {
            tracing::warn!(operation, error = %err, "booking storage call aborted");
        }
        _ => tracing::error!(operation, error = %err, "booking storage call failed"),
    }
    DomainError::Database
}
