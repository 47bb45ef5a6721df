//! Booking transport: decode HTTP → endpoint → encode HTTP.
//!
//! ```text
//! GET  /hotels/:hotel_id/bookings       list bookings     (no decode)
//! POST /hotels/:hotel_id/bookings       create a booking  (JSON body)
//! GET  /hotels/:hotel_id/bookings/:id   fetch one booking (path id)
//! ```
//!
//! The `:hotel_id` segment is informational only; the hotel scope always
//! comes from the verified token.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use hotelbook_bookings::{Booking, RequestScope};

use crate::app::errors::{ApiError, JSON_CONTENT_TYPE};
use crate::context::RequestContext;
use crate::endpoints::{BoxEndpoint, EndpointRequest, EndpointResponse, Endpoints};
use crate::middleware::extract_bearer;

/// Shared transport state: endpoints plus what each request scope derives from.
#[derive(Clone)]
pub struct TransportState {
    endpoints: Arc<Endpoints>,
    shutdown: CancellationToken,
    request_timeout: Option<Duration>,
}

impl TransportState {
    pub fn new(
        endpoints: Endpoints,
        shutdown: CancellationToken,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            shutdown,
            request_timeout,
        }
    }

    /// Fresh context for one request: child of the shutdown token, optional
    /// deadline, and the bearer token if the client sent one.
    fn context(&self, headers: &HeaderMap) -> RequestContext {
        let mut scope = RequestScope::with_cancellation(self.shutdown.child_token());
        if let Some(timeout) = self.request_timeout {
            scope = scope.with_timeout(timeout);
        }

        let ctx = RequestContext::new(scope);
        match extract_bearer(headers) {
            Some(token) => ctx.with_bearer_token(token),
            None => ctx,
        }
    }
}

pub fn router(state: TransportState) -> Router {
    Router::new()
        .route("/hotels/:hotel_id/bookings", get(list_bookings).post(create_booking))
        .route("/hotels/:hotel_id/bookings/:id", get(get_booking_by_id))
        .with_state(state)
}

async fn list_bookings(
    State(state): State<TransportState>,
    Path(params): Path<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let endpoint = state.endpoints.list_bookings.clone();
    serve(&state, &headers, &params, &endpoint, Ok(EndpointRequest::Empty), StatusCode::OK).await
}

async fn create_booking(
    State(state): State<TransportState>,
    Path(params): Path<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let endpoint = state.endpoints.create_booking.clone();
    let request = decode_create_booking(&body);
    serve(&state, &headers, &params, &endpoint, request, StatusCode::CREATED).await
}

async fn get_booking_by_id(
    State(state): State<TransportState>,
    Path(params): Path<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let endpoint = state.endpoints.get_booking_by_id.clone();
    let request = decode_id(&params);
    serve(&state, &headers, &params, &endpoint, request, StatusCode::OK).await
}

async fn serve(
    state: &TransportState,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    endpoint: &BoxEndpoint,
    decoded: Result<EndpointRequest, ApiError>,
    success: StatusCode,
) -> Response {
    let request = match decoded {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    if let Some(hotel) = params.get("hotel_id") {
        tracing::debug!(path_hotel = %hotel, "hotel path segment ignored; scope comes from the token");
    }

    match endpoint.call(state.context(headers), request).await {
        Ok(response) => encode_response(success, &response),
        Err(e) => e.into_response(),
    }
}

/// Decode a create-booking body. Any JSON failure is a bad request.
pub fn decode_create_booking(body: &[u8]) -> Result<EndpointRequest, ApiError> {
    serde_json::from_slice::<Booking>(body)
        .map(EndpointRequest::Booking)
        .map_err(|e| {
            tracing::debug!(error = %e, "booking body rejected");
            ApiError::BadRequest
        })
}

/// Take the booking id from the matched path. Absence means the route table
/// and the handler disagree.
pub fn decode_id(params: &HashMap<String, String>) -> Result<EndpointRequest, ApiError> {
    params
        .get("id")
        .cloned()
        .map(EndpointRequest::Id)
        .ok_or(ApiError::BadRouting)
}

/// Serialise a successful endpoint result as JSON with the given status.
pub fn encode_response(status: StatusCode, response: &EndpointResponse) -> Response {
    encode_json(status, response)
}

pub(crate) fn encode_json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut res = (status, body).into_response();
            res.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            res
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            crate::app::errors::json_error(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
