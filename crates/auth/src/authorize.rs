use thiserror::Error;

use hotelbook_core::HotelId;

use crate::User;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no authenticated identity")]
    Unauthenticated,

    #[error("admin privilege required")]
    NotAdmin,

    #[error("hotel mismatch")]
    HotelMismatch,
}

/// Require an authenticated caller.
pub fn require_identity(user: Option<&User>) -> Result<&User, AuthzError> {
    user.ok_or(AuthzError::Unauthenticated)
}

/// Authorize a booking write against `hotel_id`.
///
/// - No IO
/// - No panics
/// - Only admins of the same hotel may write
pub fn authorize_booking_write(user: Option<&User>, hotel_id: HotelId) -> Result<&User, AuthzError> {
    let user = require_identity(user)?;

    if !user.is_admin() {
        return Err(AuthzError::NotAdmin);
    }
    if user.hotel_id() != hotel_id {
        return Err(AuthzError::HotelMismatch);
    }

    Ok(user)
}
