//! ProviderAdapter trait definition.
//!
//! One adapter per provider translates canonical requests into that
//! provider's wire format and extracts a canonical [`Completion`] from the
//! reply. Uses RPITIT for both request classes.

use std::future::Future;

use switchyard_types::error::AdapterError;
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

/// Trait for provider backends (chat-completions, HuggingFace, Gemini, ...).
///
/// Contract for implementors:
/// - exactly one outbound attempt per call, no internal retries
/// - every transport, status, and parse failure is returned as an
///   [`AdapterError`], never a panic
///
/// Implementations live in switchyard-infra.
pub trait ProviderAdapter: Send + Sync {
    /// Registry key of the provider this adapter serves.
    fn key(&self) -> &str;

    /// Run a text completion.
    fn complete_text(
        &self,
        request: &TextRequest,
    ) -> impl Future<Output = Result<Completion, AdapterError>> + Send;

    /// Run an image + text completion.
    fn complete_vision(
        &self,
        request: &VisionRequest,
    ) -> impl Future<Output = Result<Completion, AdapterError>> + Send;
}
