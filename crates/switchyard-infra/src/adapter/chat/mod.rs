//! Chat-completions adapter.
//!
//! One [`ChatCompletionsAdapter`] serves every provider that speaks the
//! OpenAI-style `/chat/completions` dialect (OpenCode Zen, Mistral, Groq).
//! Providers differ only in endpoint, model, and sampling parameters, all
//! of which come from the descriptor.

pub mod types;

use secrecy::ExposeSecret;

use switchyard_core::provider::adapter::ProviderAdapter;
use switchyard_types::error::AdapterError;
use switchyard_types::provider::{ProviderDescriptor, RequestClass};
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use self::types::{ChatContent, ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl};
use super::http::send_json;
use super::image::data_url;
use super::{credential, ensure_supports};

/// Adapter for OpenAI-compatible chat-completions endpoints.
///
/// Does not derive Debug; the descriptor's credential stays out of logs.
pub struct ChatCompletionsAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
}

impl ChatCompletionsAdapter {
    pub fn new(client: reqwest::Client, descriptor: ProviderDescriptor) -> Self {
        Self { client, descriptor }
    }

    async fn send(
        &self,
        class: RequestClass,
        body: &ChatRequest,
    ) -> Result<Completion, AdapterError> {
        let api_key = credential(&self.descriptor)?;

        let response: ChatResponse = send_json(
            self.client
                .post(&self.descriptor.endpoint)
                .bearer_auth(api_key.expose_secret())
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

impl ProviderAdapter for ChatCompletionsAdapter {
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

fn system_message(system: Option<&str>) -> Option<ChatMessage> {
    system.map(|s| ChatMessage {
        role: "system",
        content: ChatContent::Text(s.to_string()),
    })
}

/// Build the body for a text request: optional system turn, then the user turn.
pub fn text_request(descriptor: &ProviderDescriptor, request: &TextRequest) -> ChatRequest {
    let params = descriptor.params_for(RequestClass::Text);
    let mut messages: Vec<ChatMessage> = system_message(request.system.as_deref())
        .into_iter()
        .collect();
    messages.push(ChatMessage {
        role: "user",
        content: ChatContent::Text(request.prompt.clone()),
    });

    ChatRequest {
        model: descriptor.model_for(RequestClass::Text).map(String::from),
        messages,
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    }
}

/// Build the body for a vision request. The user turn carries the prompt and
/// the image as a `data:` URL.
pub fn vision_request(descriptor: &ProviderDescriptor, request: &VisionRequest) -> ChatRequest {
    let params = descriptor.params_for(RequestClass::Vision);
    let mut messages: Vec<ChatMessage> = system_message(request.system.as_deref())
        .into_iter()
        .collect();
    messages.push(ChatMessage {
        role: "user",
        content: ChatContent::Parts(vec![
            ContentPart::Text {
                text: request.prompt.clone(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: data_url(&request.image_base64),
                },
            },
        ]),
    });

    ChatRequest {
        model: descriptor.model_for(RequestClass::Vision).map(String::from),
        messages,
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    }
}

/// Read `choices[0].message.content`.
pub fn extract_text(response: ChatResponse) -> Result<String, AdapterError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AdapterError::MalformedResponse("no choices[0].message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::test_support::{closed_endpoint, descriptor, spawn_stub};
    use serde_json::json;
    use switchyard_types::provider::{Capability, WireFormat};

    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUg==";

    fn groq() -> ProviderDescriptor {
        let mut d = descriptor("groq", WireFormat::ChatCompletions, Capability::Both);
        d.model = Some("llama-3.2-90b-vision-preview".into());
        d.text_model = Some("llama-3.1-70b-versatile".into());
        d
    }

    #[test]
    fn text_request_with_system_prompt() {
        let body = text_request(
            &groq(),
            &TextRequest::new("hello", Some("be brief".into())),
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "llama-3.1-70b-versatile",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ],
                "temperature": 0.7f32,
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn text_request_without_system_has_single_message() {
        let body = text_request(&groq(), &TextRequest::new("hello", None));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn vision_request_uses_parts_and_vision_model() {
        let body = vision_request(&groq(), &VisionRequest::new(PNG_B64, "what is this", None));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "llama-3.2-90b-vision-preview");
        assert_eq!(value["temperature"], json!(0.3f32));
        assert_eq!(value["max_tokens"], 2000);
        let content = &value["messages"][0]["content"];
        assert_eq!(content[0], json!({"type": "text", "text": "what is this"}));
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            format!("data:image/png;base64,{PNG_B64}")
        );
    }

    #[test]
    fn extract_text_reads_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "x",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}}]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "hi");
    }

    #[test]
    fn extract_text_rejects_empty_choices() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(AdapterError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn complete_text_over_http() {
        let stub = spawn_stub(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"pong"}}]}"#,
        )
        .await;
        let mut d = groq();
        d.endpoint = stub.url("/openai/v1/chat/completions");
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let completion = adapter
            .complete_text(&TextRequest::new("ping", None))
            .await
            .unwrap();
        assert_eq!(completion.text, "pong");
        assert_eq!(completion.provider, "groq");
        assert_eq!(completion.model.as_deref(), Some("llama-3.1-70b-versatile"));

        let captured = stub.single_request();
        assert_eq!(captured.path_and_query, "/openai/v1/chat/completions");
        assert_eq!(captured.authorization.as_deref(), Some("Bearer groq-secret"));
        assert_eq!(captured.body["messages"][0]["content"], "ping");
    }

    #[tokio::test]
    async fn non_success_status_is_adapter_error() {
        let stub = spawn_stub(429, r#"{"error":"rate limited"}"#).await;
        let mut d = groq();
        d.endpoint = stub.url("/chat");
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_text(&TextRequest::new("ping", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_adapter_error() {
        let stub = spawn_stub(200, "<html>oops</html>").await;
        let mut d = groq();
        d.endpoint = stub.url("/chat");
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_vision(&VisionRequest::new(PNG_B64, "x", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn text_only_provider_rejects_vision_without_sending() {
        let stub = spawn_stub(200, "{}").await;
        let mut d = descriptor("mistral", WireFormat::ChatCompletions, Capability::Text);
        d.endpoint = stub.url("/chat");
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_vision(&VisionRequest::new(PNG_B64, "x", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedClass { .. }));
        assert_eq!(stub.request_count(), 0);
    }

    #[tokio::test]
    async fn missing_credential_fails_fast() {
        let mut d = groq();
        d.credential = None;
        d.endpoint = "http://127.0.0.1:9/unreachable".into();
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_text(&TextRequest::new("ping", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::MissingCredential));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let mut d = groq();
        d.endpoint = closed_endpoint("/chat");
        let adapter = ChatCompletionsAdapter::new(reqwest::Client::new(), d);

        let err = adapter
            .complete_text(&TextRequest::new("ping", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
    }
}
