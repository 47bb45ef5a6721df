//! `hotelbook-bookings`: booking domain model and service.
//!
//! The service enforces validation and hotel-scoped authorization, then
//! delegates to a [`BookingRepository`]. Storage is someone else's problem.

pub mod booking;
pub mod repository;
pub mod scope;
pub mod service;

pub use booking::{BOOKING_TYPE, BOOKING_VERSION, Booking, Listing};
pub use repository::{BookingRepository, RepositoryError};
pub use scope::RequestScope;
pub use service::{BookingService, HotelBookingService};
