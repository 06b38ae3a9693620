//! Canonical request, result, and status types for the router.
//!
//! These are provider-agnostic: adapters translate them to and from each
//! provider's wire format.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::provider::Capability;

/// A text completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>, system: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system,
        }
    }
}

/// An image + text completion request. The image is base64 without a
/// `data:` prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    pub image_base64: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl VisionRequest {
    pub fn new(
        image_base64: impl Into<String>,
        prompt: impl Into<String>,
        system: Option<String>,
    ) -> Self {
        Self {
            image_base64: image_base64.into(),
            prompt: prompt.into(),
            system,
        }
    }
}

/// The canonical (text, provider, model) triple returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    /// Key of the provider that served the request.
    pub provider: String,
    /// Model used, when the provider reports or requires one.
    pub model: Option<String>,
}

/// Final result of one routing sweep.
///
/// Routing never returns an error: every sweep ends in one of these states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOutcome {
    /// The first admissible provider that succeeded.
    Success(Completion),
    /// Every candidate was inadmissible or failed. No provider is attributed.
    Exhausted { reason: String },
    /// The caller cancelled the sweep while an attempt was in flight.
    Cancelled,
}

impl RoutingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RoutingOutcome::Success(_))
    }

    /// Serving provider key, only present on success.
    pub fn provider(&self) -> Option<&str> {
        match self {
            RoutingOutcome::Success(c) => Some(&c.provider),
            _ => None,
        }
    }

    pub fn completion(&self) -> Option<&Completion> {
        match self {
            RoutingOutcome::Success(c) => Some(c),
            _ => None,
        }
    }

    /// Failure cause, absent on success.
    pub fn error(&self) -> Option<&str> {
        match self {
            RoutingOutcome::Success(_) => None,
            RoutingOutcome::Exhausted { reason } => Some(reason),
            RoutingOutcome::Cancelled => Some("request cancelled"),
        }
    }
}

/// Remaining daily quota for a provider.
///
/// Serializes as a number, or as the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Count(u32),
    Unlimited,
}

impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Remaining::Count(n) => serializer.serialize_u32(*n),
            Remaining::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Remaining::Count(n) => write!(f, "{n}"),
            Remaining::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Quota and availability snapshot for one provider (for status output).
#[derive(Debug, Clone, Serialize)]
pub struct ProviderQuotaStatus {
    /// Display name.
    pub name: String,
    /// Whether a credential is present.
    pub configured: bool,
    #[serde(rename = "type")]
    pub capability: Capability,
    pub priority: u32,
    pub requests_today: u32,
    /// Daily limit, `None` when unlimited.
    pub rate_limit: Option<u32>,
    pub remaining: Remaining,
    /// Whether the provider would be admitted right now.
    pub available: bool,
}
