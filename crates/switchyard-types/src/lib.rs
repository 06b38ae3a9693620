//! Shared domain types for Switchyard.
//!
//! Provider descriptors, canonical routing requests and outcomes, router
//! configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod provider;
pub mod routing;
