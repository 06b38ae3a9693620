//! Wire-format adapters for the supported provider dialects.
//!
//! - `chat`: OpenAI-style chat completions (OpenCode Zen, Mistral, Groq)
//! - `text_generation`: Hugging Face Inference
//! - `generate_content`: Google Gemini
//!
//! [`create_adapter`] picks the implementation from the descriptor's
//! [`WireFormat`] and boxes it for the router.

pub mod chat;
pub mod generate_content;
pub mod http;
pub mod image;
pub mod text_generation;

#[cfg(test)]
pub(crate) mod test_support;

use secrecy::SecretString;

use switchyard_core::provider::box_adapter::BoxProviderAdapter;
use switchyard_types::error::AdapterError;
use switchyard_types::provider::{ProviderDescriptor, RequestClass, WireFormat};

use self::chat::ChatCompletionsAdapter;
use self::generate_content::GenerateContentAdapter;
use self::text_generation::TextGenerationAdapter;

/// Build the adapter for one provider.
pub fn create_adapter(
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
) -> BoxProviderAdapter {
    match descriptor.wire {
        WireFormat::ChatCompletions => {
            BoxProviderAdapter::new(ChatCompletionsAdapter::new(client, descriptor))
        }
        WireFormat::TextGeneration => {
            BoxProviderAdapter::new(TextGenerationAdapter::new(client, descriptor))
        }
        WireFormat::GenerateContent => {
            BoxProviderAdapter::new(GenerateContentAdapter::new(client, descriptor))
        }
    }
}

pub(crate) fn credential(descriptor: &ProviderDescriptor) -> Result<&SecretString, AdapterError> {
    descriptor
        .credential
        .as_ref()
        .ok_or(AdapterError::MissingCredential)
}

pub(crate) fn ensure_supports(
    descriptor: &ProviderDescriptor,
    class: RequestClass,
) -> Result<(), AdapterError> {
    if descriptor.capability.supports(class) {
        Ok(())
    } else {
        Err(AdapterError::UnsupportedClass { class })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use super::test_support::{closed_endpoint, descriptor, spawn_stub};
    use switchyard_core::clock::SystemClock;
    use switchyard_core::provider::registry::ProviderRegistry;
    use switchyard_core::quota::QuotaTracker;
    use switchyard_core::router::{Router, RoutingPolicy};
    use switchyard_types::provider::Capability;
    use switchyard_types::routing::TextRequest;

    #[test]
    fn create_adapter_keeps_provider_key() {
        for (key, wire) in [
            ("mistral", WireFormat::ChatCompletions),
            ("huggingface", WireFormat::TextGeneration),
            ("gemini", WireFormat::GenerateContent),
        ] {
            let d = descriptor(key, wire, Capability::Both);
            let adapter = create_adapter(reqwest::Client::new(), d);
            assert_eq!(adapter.key(), key);
        }
    }

    #[test]
    fn ensure_supports_checks_capability() {
        let d = descriptor("mistral", WireFormat::ChatCompletions, Capability::Text);
        assert!(ensure_supports(&d, RequestClass::Text).is_ok());
        assert!(ensure_supports(&d, RequestClass::Vision).is_err());
    }

    #[tokio::test]
    async fn unreachable_provider_falls_back_to_next() {
        let stub = spawn_stub(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"from mistral"}}]}"#,
        )
        .await;

        let mut down = descriptor("opencode_zen", WireFormat::ChatCompletions, Capability::Text);
        down.endpoint = closed_endpoint("/chat/completions");
        let mut up = descriptor("mistral", WireFormat::ChatCompletions, Capability::Text);
        up.endpoint = stub.url("/v1/chat/completions");

        let registry = Arc::new(ProviderRegistry::new(vec![down, up]).unwrap());
        let client = reqwest::Client::new();
        let adapters = registry
            .iter()
            .map(|d| create_adapter(client.clone(), d.clone()))
            .collect();
        let quota = Arc::new(QuotaTracker::new(registry.clone(), Arc::new(SystemClock)));
        let policy = RoutingPolicy {
            text_order: vec!["opencode_zen".into(), "mistral".into()],
            vision_order: Vec::new(),
            ..RoutingPolicy::default()
        };
        let router = Router::new(registry, quota, adapters, policy);

        let outcome = router.route_text(&TextRequest::new("hi", None)).await;
        let completion = outcome.completion().expect("routing should succeed");
        assert_eq!(completion.provider, "mistral");
        assert_eq!(completion.text, "from mistral");
        assert_eq!(stub.request_count(), 1);

        assert_eq!(router.quota().snapshot("opencode_zen").unwrap().requests_today, 0);
        assert_eq!(router.quota().snapshot("mistral").unwrap().requests_today, 1);
    }
}
