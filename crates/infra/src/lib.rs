//! Infrastructure layer: booking storage adapters and database bootstrap.

pub mod db;
pub mod repository;

pub use db::{DbSettings, connect_postgres};
pub use repository::{InMemoryBookingRepository, PostgresBookingRepository};
