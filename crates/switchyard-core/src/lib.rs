//! Routing logic for Switchyard.
//!
//! This crate owns the provider registry, daily quota tracking, and the
//! ordered fallback router. It depends only on `switchyard-types` and never
//! performs network IO itself; concrete adapters live in `switchyard-infra`.

pub mod clock;
pub mod provider;
pub mod quota;
pub mod router;

#[cfg(test)]
mod test_support;
