//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a hotel (the scoping boundary for bookings and users).
///
/// Zero is the "unset" value a client produces when it omits the field.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(i64);

impl HotelId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }

    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Display for HotelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Generate a fresh, globally unique booking identifier.
///
/// Uses UUIDv7 (time-ordered). Booking ids stay opaque strings on the wire.
pub fn new_booking_id() -> String {
    Uuid::now_v7().to_string()
}
