use std::time::Duration;

use thiserror::Error;

use crate::provider::{Capability, RequestClass};

/// Errors from a single provider attempt.
///
/// Every adapter failure is converted into one of these at the adapter
/// boundary. The router logs it and falls back to the next candidate.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{class} requests are not supported by this provider")]
    UnsupportedClass { class: RequestClass },

    #[error("no credential configured")]
    MissingCredential,
}

/// Errors raised while loading configuration or assembling the router.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("duplicate provider key '{0}'")]
    DuplicateProvider(String),

    #[error("{class} candidate order references unknown provider '{key}'")]
    UnknownCandidate { class: RequestClass, key: String },

    #[error("provider '{key}' has capability '{capability}' and cannot serve {class} requests")]
    CapabilityMismatch {
        class: RequestClass,
        key: String,
        capability: Capability,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
