//! REST API handlers for routing and quota endpoints.

pub mod quota;
pub mod route;
