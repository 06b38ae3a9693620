//! Infrastructure layer for Switchyard.
//!
//! Contains the HTTP adapters that implement `ProviderAdapter` from
//! `switchyard-core` for each provider wire format, plus configuration
//! loading and router assembly.

pub mod adapter;
pub mod config;
