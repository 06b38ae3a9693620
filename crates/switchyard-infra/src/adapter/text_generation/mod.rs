//! Hugging Face Inference adapter.
//!
//! Text only. The chat turn is flattened into a single `inputs` string.

pub mod types;

use secrecy::ExposeSecret;

use switchyard_core::provider::adapter::ProviderAdapter;
use switchyard_types::error::AdapterError;
use switchyard_types::provider::{ProviderDescriptor, RequestClass};
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use self::types::{TextGenerationParameters, TextGenerationRequest, TextGenerationResponse};
use super::http::send_json;
use super::{credential, ensure_supports};

pub struct TextGenerationAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
}

impl TextGenerationAdapter {
    pub fn new(client: reqwest::Client, descriptor: ProviderDescriptor) -> Self {
        Self { client, descriptor }
    }
}

impl ProviderAdapter for TextGenerationAdapter {
    fn key(&self) -> &str {
        &self.descriptor.key
    }

    async fn complete_text(&self, request: &TextRequest) -> Result<Completion, AdapterError> {
        ensure_supports(&self.descriptor, RequestClass::Text)?;
        let api_key = credential(&self.descriptor)?;
        let body = text_generation_request(&self.descriptor, request);

        let response: TextGenerationResponse = send_json(
            self.client
                .post(&self.descriptor.endpoint)
                .bearer_auth(api_key.expose_secret())
                .json(&body),
        )
        .await?;

        Ok(Completion {
            text: extract_text(response)?,
            provider: self.descriptor.key.clone(),
            model: self.descriptor.model_for(RequestClass::Text).map(String::from),
        })
    }

    async fn complete_vision(&self, _request: &VisionRequest) -> Result<Completion, AdapterError> {
        Err(AdapterError::UnsupportedClass {
            class: RequestClass::Vision,
        })
    }
}

/// Flatten system + user turns into a completion-style prompt.
pub fn flatten_prompt(request: &TextRequest) -> String {
    match request.system.as_deref() {
        Some(system) => format!("{system}\n\nUser: {}\n\nAssistant:", request.prompt),
        None => format!("User: {}\n\nAssistant:", request.prompt),
    }
}

pub fn text_generation_request(
    descriptor: &ProviderDescriptor,
    request: &TextRequest,
) -> TextGenerationRequest {
    let params = descriptor.params_for(RequestClass::Text);
    TextGenerationRequest {
        inputs: flatten_prompt(request),
        parameters: TextGenerationParameters {
            max_new_tokens: params.max_tokens,
            temperature: params.temperature,
            return_full_text: false,
        },
    }
}

/// Read `[0].generated_text` or `generated_text`.
pub fn extract_text(response: TextGenerationResponse) -> Result<String, AdapterError> {
    let generated = match response {
        TextGenerationResponse::Batch(items) => items.into_iter().next(),
        TextGenerationResponse::Single(item) => Some(item),
    };
    generated
        .and_then(|g| g.generated_text)
        .ok_or_else(|| AdapterError::MalformedResponse("no generated_text in response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::test_support::{descriptor, spawn_stub};
    use serde_json::json;
    use switchyard_types::provider::{Capability, GenerationParams, WireFormat};

    fn huggingface() -> ProviderDescriptor {
        let mut d = descriptor("huggingface", WireFormat::TextGeneration, Capability::Text);
        d.model = Some("Mistral-7B-Instruct".into());
        d.text_params = GenerationParams::new(0.7, 500);
        d
    }

    #[test]
    fn flattens_with_and_without_system() {
        assert_eq!(
            flatten_prompt(&TextRequest::new("hi", Some("sys".into()))),
            "sys\n\nUser: hi\n\nAssistant:"
        );
        assert_eq!(
            flatten_prompt(&TextRequest::new("hi", None)),
            "User: hi\n\nAssistant:"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = text_generation_request(&huggingface(), &TextRequest::new("hi", None));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "inputs": "User: hi\n\nAssistant:",
                "parameters": {
                    "max_new_tokens": 500,
                    "temperature": 0.7f32,
                    "return_full_text": false
                }
            })
        );
    }

    #[test]
    fn extracts_from_array_and_object() {
        let batch: TextGenerationResponse = serde_json::from_value(json!([
            {"generated_text": " first"},
            {"generated_text": "second"}
        ]))
        .unwrap();
        assert_eq!(extract_text(batch).unwrap(), " first");

        let single: TextGenerationResponse =
            serde_json::from_value(json!({"generated_text": "only"})).unwrap();
        assert_eq!(extract_text(single).unwrap(), "only");
    }

    #[test]
    fn missing_generated_text_is_malformed() {
        let empty: TextGenerationResponse = serde_json::from_value(json!([])).unwrap();
        assert!(extract_text(empty).is_err());

        let loading: TextGenerationResponse =
            serde_json::from_value(json!({"error": "Model is loading"})).unwrap();
        assert!(matches!(
            extract_text(loading),
            Err(AdapterError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn vision_is_unsupported() {
        let adapter = TextGenerationAdapter::new(reqwest::Client::new(), huggingface());
        let err = adapter
            .complete_vision(&VisionRequest::new("AAAA", "x", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedClass { .. }));
    }

    #[tokio::test]
    async fn complete_text_over_http() {
        let stub = spawn_stub(200, r#"[{"generated_text":"Hello there"}]"#).await;
        let mut d = huggingface();
        d.endpoint = stub.url("/models/mistralai/Mistral-7B-Instruct-v0.2");
        let adapter = TextGenerationAdapter::new(reqwest::Client::new(), d);

        let completion = adapter
            .complete_text(&TextRequest::new("hi", Some("sys".into())))
            .await
            .unwrap();
        assert_eq!(completion.text, "Hello there");
        assert_eq!(completion.model.as_deref(), Some("Mistral-7B-Instruct"));

        let captured = stub.single_request();
        assert_eq!(
            captured.authorization.as_deref(),
            Some("Bearer huggingface-secret")
        );
        assert_eq!(captured.body["inputs"], "sys\n\nUser: hi\n\nAssistant:");
    }

    #[tokio::test]
    async fn server_error_is_adapter_error() {
        let stub = spawn_stub(503, r#"{"error":"Model is currently loading"}"#).await;
        let mut d = huggingface();
        d.endpoint = stub.url("/models/x");
        let adapter = TextGenerationAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_text(&TextRequest::new("hi", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Status { status: 503, .. }));
    }
}
