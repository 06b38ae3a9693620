//! Provider abstractions for Switchyard.
//!
//! - `ProviderAdapter`: RPITIT trait for concrete wire-format adapters
//! - `BoxProviderAdapter`: object-safe wrapper for dynamic dispatch
//! - `ProviderRegistry`: read-only descriptor lookup

pub mod adapter;
pub mod box_adapter;
pub mod registry;
