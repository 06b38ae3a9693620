//! Gemini `generateContent` adapter.
//!
//! The API key travels in the `key` query parameter rather than a header.
//! Text requests are accepted when the descriptor allows them, though the
//! built-in Gemini entry is vision-only.

pub mod types;

use secrecy::ExposeSecret;

use switchyard_core::provider::adapter::ProviderAdapter;
use switchyard_types::error::AdapterError;
use switchyard_types::provider::{ProviderDescriptor, RequestClass};
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use self::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use super::http::send_json;
use super::image::sniff_mime;
use super::{credential, ensure_supports};

pub struct GenerateContentAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
}

impl GenerateContentAdapter {
    pub fn new(client: reqwest::Client, descriptor: ProviderDescriptor) -> Self {
        Self { client, descriptor }
    }

    async fn send(
        &self,
        class: RequestClass,
        body: &GenerateContentRequest,
    ) -> Result<Completion, AdapterError> {
        let api_key = credential(&self.descriptor)?;

        let response: GenerateContentResponse = send_json(
            self.client
                .post(&self.descriptor.endpoint)
                .query(&[("key", api_key.expose_secret())])
                .json(body),
        )
        .await?;

        Ok(Completion {
            text: extract_text(response)?,
            provider: self.descriptor.key.clone(),
            model: self.descriptor.model_for(class).map(String::from),
        })
    }
}

impl ProviderAdapter for GenerateContentAdapter {
    fn key(&self) -> &str {
        &self.descriptor.key
    }

    async fn complete_text(&self, request: &TextRequest) -> Result<Completion, AdapterError> {
        ensure_supports(&self.descriptor, RequestClass::Text)?;
        let body = text_request(&self.descriptor, request);
        self.send(RequestClass::Text, &body).await
    }

    async fn complete_vision(&self, request: &VisionRequest) -> Result<Completion, AdapterError> {
        ensure_supports(&self.descriptor, RequestClass::Vision)?;
        let body = vision_request(&self.descriptor, request);
        self.send(RequestClass::Vision, &body).await
    }
}

fn text_parts(system: Option<&str>, prompt: &str) -> Vec<Part> {
    let mut parts: Vec<Part> = system
        .map(|s| Part::Text { text: s.to_string() })
        .into_iter()
        .collect();
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    parts
}

fn build(
    descriptor: &ProviderDescriptor,
    class: RequestClass,
    parts: Vec<Part>,
) -> GenerateContentRequest {
    let params = descriptor.params_for(class);
    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
        },
    }
}

pub fn text_request(
    descriptor: &ProviderDescriptor,
    request: &TextRequest,
) -> GenerateContentRequest {
    let parts = text_parts(request.system.as_deref(), &request.prompt);
    build(descriptor, RequestClass::Text, parts)
}

/// Parts are `[system?, prompt, inline image]`, in that order.
pub fn vision_request(
    descriptor: &ProviderDescriptor,
    request: &VisionRequest,
) -> GenerateContentRequest {
    let mut parts = text_parts(request.system.as_deref(), &request.prompt);
    parts.push(Part::InlineData {
        inline_data: InlineData {
            mime_type: sniff_mime(&request.image_base64).to_string(),
            data: request.image_base64.clone(),
        },
    });
    build(descriptor, RequestClass::Vision, parts)
}

/// Read `candidates[0].content.parts[0].text`.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, AdapterError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            AdapterError::MalformedResponse("no candidates[0].content.parts[0].text".into())
        })
}
