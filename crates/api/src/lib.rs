//! HTTP API: config, request context, endpoints, authorization middleware,
//! and the axum transport.

pub mod app;
pub mod config;
pub mod context;
pub mod endpoints;
pub mod middleware;
