use serde::{Deserialize, Serialize};

use hotelbook_core::HotelId;

/// Authenticated caller, derived once per request from verified token claims.
///
/// Immutable and scoped to a single hotel. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    admin: bool,
    hotel_id: HotelId,
}

impl User {
    pub fn new(name: impl Into<String>, admin: bool, hotel_id: HotelId) -> Self {
        Self {
            name: name.into(),
            admin,
            hotel_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn hotel_id(&self) -> HotelId {
        self.hotel_id
    }
}
