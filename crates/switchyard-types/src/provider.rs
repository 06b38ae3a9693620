//! Provider descriptor types for Switchyard.
//!
//! A [`ProviderDescriptor`] is the immutable description of one external
//! inference service: where it lives, what it can do, how it is
//! authenticated, and which wire format its adapter speaks.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// What kind of requests a provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Text,
    Vision,
    Both,
}

impl Capability {
    /// Whether this capability covers the given request class.
    pub fn supports(self, class: RequestClass) -> bool {
        matches!(
            (self, class),
            (Capability::Both, _)
                | (Capability::Text, RequestClass::Text)
                | (Capability::Vision, RequestClass::Vision)
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Text => write!(f, "text"),
            Capability::Vision => write!(f, "vision"),
            Capability::Both => write!(f, "both"),
        }
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Capability::Text),
            "vision" => Ok(Capability::Vision),
            "both" => Ok(Capability::Both),
            other => Err(format!("invalid capability: '{other}'")),
        }
    }
}

/// The two request classes the router dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestClass {
    Text,
    Vision,
}

impl fmt::Display for RequestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestClass::Text => write!(f, "text"),
            RequestClass::Vision => write!(f, "vision"),
        }
    }
}

impl FromStr for RequestClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(RequestClass::Text),
            "vision" => Ok(RequestClass::Vision),
            other => Err(format!("invalid request class: '{other}'")),
        }
    }
}

/// Wire protocol spoken by a provider's HTTP endpoint.
///
/// Each variant maps to one adapter translation in `switchyard-infra`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// OpenAI-style `/chat/completions` with a `messages` array and bearer auth.
    ChatCompletions,
    /// HuggingFace Inference: a flattened `inputs` string plus `parameters`.
    TextGeneration,
    /// Gemini `generateContent`: `contents[].parts[]`, key in the query string.
    GenerateContent,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::ChatCompletions => write!(f, "chat_completions"),
            WireFormat::TextGeneration => write!(f, "text_generation"),
            WireFormat::GenerateContent => write!(f, "generate_content"),
        }
    }
}

/// Sampling parameters sent with every request of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// Defaults for text completion.
    pub const fn text_default() -> Self {
        Self::new(0.7, 1000)
    }

    /// Defaults for vision completion.
    pub const fn vision_default() -> Self {
        Self::new(0.3, 2000)
    }
}

/// Immutable description of one inference provider.
///
/// The credential is a [`SecretString`], which redacts itself in `Debug`
/// output, so the derived impl never prints the key.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Stable lookup key (e.g., "groq").
    pub key: String,
    /// Human-readable name (e.g., "Groq (llama-3.2-90b-vision)").
    pub display_name: String,
    /// Full endpoint URL the adapter POSTs to.
    pub endpoint: String,
    /// Model identifier sent to (or reported for) the provider.
    pub model: Option<String>,
    /// Model override used for text requests only.
    pub text_model: Option<String>,
    /// API credential. `None` means the provider is never admissible.
    pub credential: Option<SecretString>,
    pub capability: Capability,
    /// Informational rank (lower = preferred). Never used for trial order.
    pub priority: u32,
    /// Requests allowed per calendar day; `None` means unlimited.
    pub daily_limit: Option<u32>,
    pub wire: WireFormat,
    pub text_params: GenerationParams,
    pub vision_params: GenerationParams,
}

impl ProviderDescriptor {
    /// Whether a credential was configured for this provider.
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Model used when serving the given class.
    pub fn model_for(&self, class: RequestClass) -> Option<&str> {
        match class {
            RequestClass::Text => self.text_model.as_deref().or(self.model.as_deref()),
            RequestClass::Vision => self.model.as_deref(),
        }
    }

    /// Generation parameters for the given class.
    pub fn params_for(&self, class: RequestClass) -> GenerationParams {
        match class {
            RequestClass::Text => self.text_params,
            RequestClass::Vision => self.vision_params,
        }
    }
}
