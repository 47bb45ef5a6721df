use axum::Router;

pub mod bookings;
pub mod system;

pub use bookings::TransportState;

/// Every route the service exposes. Booking routes are authenticated inside
/// the endpoint chain; `/health` is open.
pub fn router(state: TransportState) -> Router {
    Router::new()
        .merge(system::router())
        .merge(bookings::router(state))
}
