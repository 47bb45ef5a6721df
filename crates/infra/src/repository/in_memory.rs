use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use hotelbook_bookings::{Booking, BookingRepository, RepositoryError};
use hotelbook_core::HotelId;

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Booking>,
    by_id: HashMap<String, usize>,
}

/// In-memory booking store for tests/dev.
///
/// Ids are unique across hotels; listings come back in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    inner: RwLock<Inner>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Backend("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if inner.by_id.contains_key(&booking.id) {
            return Err(RepositoryError::Duplicate(booking.id.clone()));
        }

        let pos = inner.rows.len();
        inner.rows.push(booking.clone());
        inner.by_id.insert(booking.id.clone(), pos);
        Ok(())
    }

    async fn list(&self, hotel_id: HotelId) -> Result<Vec<Booking>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .rows
            .iter()
            .filter(|b| b.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_hotel(
        &self,
        hotel_id: HotelId,
        id: &str,
    ) -> Result<Option<Booking>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .by_id
            .get(id)
            .and_then(|&pos| inner.rows.get(pos))
            .filter(|b| b.hotel_id == hotel_id)
            .cloned())
    }
}
