//! BoxProviderAdapter -- object-safe dynamic dispatch wrapper for ProviderAdapter.
//!
//! 1. Define an object-safe `ProviderAdapterDyn` trait with boxed futures
//! 2. Blanket-impl `ProviderAdapterDyn` for all `T: ProviderAdapter`
//! 3. `BoxProviderAdapter` wraps `Box<dyn ProviderAdapterDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use switchyard_types::error::AdapterError;
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use super::adapter::ProviderAdapter;

type AdapterFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Completion, AdapterError>> + Send + 'a>>;

/// Object-safe version of [`ProviderAdapter`] with boxed futures.
pub trait ProviderAdapterDyn: Send + Sync {
    fn key(&self) -> &str;

    fn complete_text_boxed<'a>(&'a self, request: &'a TextRequest) -> AdapterFuture<'a>;

    fn complete_vision_boxed<'a>(&'a self, request: &'a VisionRequest) -> AdapterFuture<'a>;
}

impl<T: ProviderAdapter> ProviderAdapterDyn for T {
    fn key(&self) -> &str {
        ProviderAdapter::key(self)
    }

    fn complete_text_boxed<'a>(&'a self, request: &'a TextRequest) -> AdapterFuture<'a> {
        Box::pin(self.complete_text(request))
    }

    fn complete_vision_boxed<'a>(&'a self, request: &'a VisionRequest) -> AdapterFuture<'a> {
        Box::pin(self.complete_vision(request))
    }
}

/// Type-erased adapter so the router can hold different wire formats in
/// one map.
pub struct BoxProviderAdapter {
    inner: Box<dyn ProviderAdapterDyn + Send + Sync>,
}

impl BoxProviderAdapter {
    /// Wrap a concrete `ProviderAdapter` in a type-erased box.
    pub fn new<T: ProviderAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Box::new(adapter),
        }
    }

    pub fn key(&self) -> &str {
        self.inner.key()
    }

    pub async fn complete_text(&self, request: &TextRequest) -> Result<Completion, AdapterError> {
        self.inner.complete_text_boxed(request).await
    }

    pub async fn complete_vision(
        &self,
        request: &VisionRequest,
    ) -> Result<Completion, AdapterError> {
        self.inner.complete_vision_boxed(request).await
    }
}
