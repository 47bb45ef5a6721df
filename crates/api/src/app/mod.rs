//! HTTP application wiring.
//!
//! - `routes/`: axum handlers, request decoding and response encoding
//! - `errors.rs`: error type and the JSON error envelope

use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;

use hotelbook_auth::{Hs256JwtValidator, JwtValidator};
use hotelbook_bookings::{BookingRepository, BookingService, HotelBookingService};
use hotelbook_infra::{InMemoryBookingRepository, PostgresBookingRepository, connect_postgres};

use crate::config::{ApiConfig, StoreConfig};
use crate::endpoints::Endpoints;
use crate::middleware::{self, AuthMiddleware};

pub mod errors;
pub mod routes;

/// Build the full HTTP router over the given repository.
///
/// Cancelling `shutdown` cancels every in-flight request scope.
pub fn build_app(
    config: &ApiConfig,
    repository: Arc<dyn BookingRepository>,
    shutdown: CancellationToken,
) -> Router {
    let jwt: Arc<dyn JwtValidator> =
        Arc::new(Hs256JwtValidator::new(config.jwt_secret.as_bytes()));
    let service: Arc<dyn BookingService> = Arc::new(HotelBookingService::new(repository));
    let endpoints = Endpoints::new(service, &AuthMiddleware::new(jwt));

    let state = routes::TransportState::new(endpoints, shutdown, config.request_timeout);

    routes::router(state).layer(
        ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)),
    )
}

/// Open the configured booking store.
pub async fn build_repository(store: &StoreConfig) -> anyhow::Result<Arc<dyn BookingRepository>> {
    match store {
        StoreConfig::InMemory => {
            tracing::info!(store = "memory", "using in-memory booking store");
            Ok(Arc::new(InMemoryBookingRepository::new()))
        }
        StoreConfig::Postgres(settings) => {
            let pool = connect_postgres(settings).await?;
            let repo = PostgresBookingRepository::new(pool);
            repo.ensure_schema().await?;
            tracing::info!(store = "postgres", db = ?settings, "using postgres booking store");
            Ok(Arc::new(repo))
        }
    }
}
