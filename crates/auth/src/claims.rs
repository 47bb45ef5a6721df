use serde::{Deserialize, Serialize};
use thiserror::Error;

use hotelbook_core::HotelId;

use crate::User;

/// Bearer token claims model (transport-agnostic).
///
/// Only trusted after the signature has been verified by a [`crate::JwtValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelClaims {
    /// Subject, when the issuer sets one. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Display name of the staff member.
    pub name: String,

    /// Whether the caller may create bookings.
    pub admin: bool,

    /// Hotel the caller belongs to. Issuers encode it as a JSON number.
    pub hotel: f64,
}

impl HotelClaims {
    /// Build the request identity. The hotel number is truncated toward zero.
    pub fn into_user(self) -> User {
        User::new(self.name, self.admin, HotelId::new(self.hotel.trunc() as i64))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token missing from request context")]
    Missing,

    #[error("token is malformed")]
    Malformed,

    #[error("unexpected signing method")]
    UnexpectedSigningMethod,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token is not active yet")]
    NotActive,

    #[error("token claims are missing or mistyped")]
    InvalidClaims,

    #[error("token is invalid")]
    Invalid,
}
