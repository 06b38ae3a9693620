//! Shared fixtures for unit tests in this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use secrecy::SecretString;

use switchyard_types::error::AdapterError;
use switchyard_types::provider::{Capability, GenerationParams, ProviderDescriptor, WireFormat};
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use crate::provider::adapter::ProviderAdapter;

pub fn descriptor(
    key: &str,
    capability: Capability,
    daily_limit: Option<u32>,
    configured: bool,
) -> ProviderDescriptor {
    ProviderDescriptor {
        key: key.to_string(),
        display_name: format!("{key} display"),
        endpoint: format!("https://{key}.example.com/v1/chat/completions"),
        model: Some(format!("{key}-model")),
        text_model: None,
        credential: configured.then(|| SecretString::from(format!("{key}-secret"))),
        capability,
        priority: 1,
        daily_limit,
        wire: WireFormat::ChatCompletions,
        text_params: GenerationParams::text_default(),
        vision_params: GenerationParams::vision_default(),
    }
}

#[derive(Clone)]
pub enum MockBehavior {
    Succeed,
    /// Sleeps for the given duration, then succeeds.
    Delay(Duration),
    Fail,
    /// Never resolves; used for timeout and cancellation tests.
    Hang,
}

/// Adapter with a fixed behavior that counts its invocations.
pub struct MockAdapter {
    key: String,
    behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockAdapter {
    pub fn new(key: &str, behavior: MockBehavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                key: key.to_string(),
                behavior,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn completion(&self, text: String) -> Completion {
        Completion {
            text,
            provider: self.key.clone(),
            model: Some(format!("{}-model", self.key)),
        }
    }

    async fn respond(&self, text: String) -> Result<Completion, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Succeed => Ok(self.completion(text)),
            MockBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(self.completion(text))
            }
            MockBehavior::Fail => Err(AdapterError::Status {
                status: 500,
                body: format!("{} is down", self.key),
            }),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AdapterError::Transport("unreachable".into()))
            }
        }
    }
}

impl ProviderAdapter for MockAdapter {
    fn key(&self) -> &str {
        &self.key
    }

    async fn complete_text(&self, request: &TextRequest) -> Result<Completion, AdapterError> {
        self.respond(format!("{} says: {}", self.key, request.prompt))
            .await
    }

    async fn complete_vision(&self, request: &VisionRequest) -> Result<Completion, AdapterError> {
        self.respond(format!("{} sees: {}", self.key, request.prompt))
            .await
    }
}
