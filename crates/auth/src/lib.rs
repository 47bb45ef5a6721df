//! `hotelbook-auth`: authentication/authorization boundary.
//!
//! Decoupled from HTTP and storage: tokens come in as strings, identities and
//! policy decisions come out.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod user;

pub use authorize::{AuthzError, authorize_booking_write, require_identity};
pub use claims::{HotelClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use user::User;
