//! [`hotelbook_bookings::BookingRepository`] implementations.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryBookingRepository;
pub use postgres::PostgresBookingRepository;
