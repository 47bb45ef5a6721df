use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use hotelbook_core::HotelId;

use crate::Booking;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("booking '{0}' already exists")]
    Duplicate(String),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Collection of bookings keyed by `(hotel_id, id)`.
///
/// Implementations live outside this crate (in-memory, Postgres, test doubles).
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking. Fails with [`RepositoryError::Duplicate`] if the id exists.
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError>;

    /// All bookings of a hotel.
    async fn list(&self, hotel_id: HotelId) -> Result<Vec<Booking>, RepositoryError>;

    /// A single booking of a hotel. Absence is `Ok(None)`, not an error.
    async fn find_by_id_and_hotel(
        &self,
        hotel_id: HotelId,
        id: &str,
    ) -> Result<Option<Booking>, RepositoryError>;
}

#[async_trait]
impl<R> BookingRepository for Arc<R>
where
    R: BookingRepository + ?Sized,
{
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        (**self).insert(booking).await
    }

    async fn list(&self, hotel_id: HotelId) -> Result<Vec<Booking>, RepositoryError> {
        (**self).list(hotel_id).await
    }

    async fn find_by_id_and_hotel(
        &self,
        hotel_id: HotelId,
        id: &str,
    ) -> Result<Option<Booking>, RepositoryError> {
        (**self).find_by_id_and_hotel(hotel_id, id).await
    }
}
