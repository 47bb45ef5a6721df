//! Endpoint layer: transport-agnostic adapters from a request enum to typed
//! service calls.
//!
//! Each endpoint takes the identity from the [`RequestContext`] (placed there
//! by the authorization middleware) and passes it explicitly to the service.
//! A request variant the endpoint does not expect is a wiring fault.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use hotelbook_bookings::{Booking, BookingService, Listing};

use crate::app::errors::ApiError;
use crate::context::RequestContext;

/// Decoded request payload handed to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointRequest {
    Empty,
    Booking(Booking),
    Id(String),
}

/// Typed result of an endpoint, serialised as its inner value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EndpointResponse {
    Listing(Listing),
    Booking(Booking),
}

#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn call(
        &self,
        ctx: RequestContext,
        request: EndpointRequest,
    ) -> Result<EndpointResponse, ApiError>;
}

pub type BoxEndpoint = Arc<dyn Endpoint>;

/// Wraps an endpoint with cross-cutting behaviour.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: BoxEndpoint) -> BoxEndpoint;
}

/// Passes endpoints through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn wrap(&self, next: BoxEndpoint) -> BoxEndpoint {
        next
    }
}

/// All booking endpoints, each already wrapped in the middleware.
#[derive(Clone)]
pub struct Endpoints {
    pub list_bookings: BoxEndpoint,
    pub create_booking: BoxEndpoint,
    pub get_booking_by_id: BoxEndpoint,
}

impl Endpoints {
    pub fn new(service: Arc<dyn BookingService>, middleware: &dyn Middleware) -> Self {
        Self {
            list_bookings: middleware.wrap(Arc::new(ListBookingsEndpoint {
                service: service.clone(),
            })),
            create_booking: middleware.wrap(Arc::new(CreateBookingEndpoint {
                service: service.clone(),
            })),
            get_booking_by_id: middleware.wrap(Arc::new(GetBookingByIdEndpoint { service })),
        }
    }
}

struct ListBookingsEndpoint {
    service: Arc<dyn BookingService>,
}

#[async_trait]
impl Endpoint for ListBookingsEndpoint {
    async fn call(
        &self,
        ctx: RequestContext,
        _request: EndpointRequest,
    ) -> Result<EndpointResponse, ApiError> {
        let listing = self
            .service
            .list_bookings(ctx.scope(), ctx.identity())
            .await?;
        Ok(EndpointResponse::Listing(listing))
    }
}

struct CreateBookingEndpoint {
    service: Arc<dyn BookingService>,
}

#[async_trait]
impl Endpoint for CreateBookingEndpoint {
    async fn call(
        &self,
        ctx: RequestContext,
        request: EndpointRequest,
    ) -> Result<EndpointResponse, ApiError> {
        let EndpointRequest::Booking(booking) = request else {
            return Err(ApiError::BadWiring);
        };

        let created = self
            .service
            .create_booking(ctx.scope(), ctx.identity(), booking)
            .await?;
        Ok(EndpointResponse::Booking(created))
    }
}

struct GetBookingByIdEndpoint {
    service: Arc<dyn BookingService>,
}

#[async_trait]
impl Endpoint for GetBookingByIdEndpoint {
    async fn call(
        &self,
        ctx: RequestContext,
        request: EndpointRequest,
    ) -> Result<EndpointResponse, ApiError> {
        let EndpointRequest::Id(id) = request else {
            return Err(ApiError::BadWiring);
        };

        let booking = self
            .service
            .get_booking_by_id(ctx.scope(), ctx.identity(), &id)
            .await?;
        Ok(EndpointResponse::Booking(booking))
    }
}
