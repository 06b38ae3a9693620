//! HTTP/REST API layer for Switchyard.
//!
//! Axum-based REST API at `/api/v1/` with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
