//! Router configuration types for Switchyard.
//!
//! `RouterConfig` is the top-level `switchyard.toml`. Every field has a
//! default, so an empty file (or no file) yields the built-in provider set.

use serde::{Deserialize, Serialize};

use crate::provider::{Capability, GenerationParams, WireFormat};

/// Top-level router configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Provider definitions. Replaces the built-in set when present.
    #[serde(default = "builtin_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Candidate order for text requests.
    #[serde(default = "default_text_order")]
    pub text_order: Vec<String>,

    /// Candidate order for vision requests.
    #[serde(default = "default_vision_order")]
    pub vision_order: Vec<String>,

    /// Upper bound for one text attempt, in seconds.
    #[serde(default = "default_text_timeout_secs")]
    pub text_timeout_secs: u64,

    /// Upper bound for one vision attempt, in seconds.
    #[serde(default = "default_vision_timeout_secs")]
    pub vision_timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            providers: builtin_providers(),
            text_order: default_text_order(),
            vision_order: default_vision_order(),
            text_timeout_secs: default_text_timeout_secs(),
            vision_timeout_secs: default_vision_timeout_secs(),
        }
    }
}

/// Configuration for a single provider.
///
/// The credential itself never appears here, only the name of the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub key: String,
    pub display_name: String,
    pub endpoint: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub text_model: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    pub capability: Capability,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub daily_limit: Option<u32>,
    pub wire: WireFormat,
    #[serde(default = "GenerationParams::text_default")]
    pub text_params: GenerationParams,
    #[serde(default = "GenerationParams::vision_default")]
    pub vision_params: GenerationParams,
}

fn default_priority() -> u32 {
    10
}

fn default_text_timeout_secs() -> u64 {
    60
}

fn default_vision_timeout_secs() -> u64 {
    90
}

fn default_text_order() -> Vec<String> {
    ["opencode_zen", "mistral", "groq", "huggingface"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_vision_order() -> Vec<String> {
    ["gemini", "groq"].into_iter().map(String::from).collect()
}

/// The free-tier providers Switchyard ships with.
pub fn builtin_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            key: "opencode_zen".into(),
            display_name: "OpenCode Zen (grok-code)".into(),
            endpoint: "https://api.opencode.ai/v1/chat/completions".into(),
            model: Some("grok-code".into()),
            text_model: None,
            api_key_env: Some("OPENCODE_ZEN_API_KEY".into()),
            capability: Capability::Text,
            priority: 1,
            daily_limit: None,
            wire: WireFormat::ChatCompletions,
            text_params: GenerationParams::new(0.7, 2000),
            vision_params: GenerationParams::vision_default(),
        },
        ProviderConfig {
            key: "gemini".into(),
            display_name: "Google Gemini 2.0 Flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent".into(),
            model: Some("gemini-2.0-flash".into()),
            text_model: None,
            api_key_env: Some("GEMINI_API_KEY".into()),
            capability: Capability::Vision,
            priority: 1,
            daily_limit: Some(1500),
            wire: WireFormat::GenerateContent,
            text_params: GenerationParams::text_default(),
            vision_params: GenerationParams::new(0.3, 2000),
        },
        ProviderConfig {
            key: "mistral".into(),
            display_name: "Mistral AI".into(),
            endpoint: "https://api.mistral.ai/v1/chat/completions".into(),
            model: Some("mistral-small-latest".into()),
            text_model: None,
            api_key_env: Some("MISTRAL_API_KEY".into()),
            capability: Capability::Text,
            priority: 2,
            daily_limit: None,
            wire: WireFormat::ChatCompletions,
            text_params: GenerationParams::new(0.7, 1000),
            vision_params: GenerationParams::vision_default(),
        },
        ProviderConfig {
            key: "groq".into(),
            display_name: "Groq (llama-3.2-90b-vision)".into(),
            endpoint: "https://api.groq.com/openai/v1/chat/completions".into(),
            model: Some("llama-3.2-90b-vision-preview".into()),
            text_model: Some("llama-3.1-70b-versatile".into()),
            api_key_env: Some("GROQ_API_KEY".into()),
            capability: Capability::Both,
            priority: 2,
            daily_limit: Some(14_400),
            wire: WireFormat::ChatCompletions,
            text_params: GenerationParams::new(0.7, 1000),
            vision_params: GenerationParams::new(0.3, 2000),
        },
        ProviderConfig {
            key: "huggingface".into(),
            display_name: "HuggingFace Inference".into(),
            endpoint: "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2".into(),
            model: Some("Mistral-7B-Instruct".into()),
            text_model: None,
            api_key_env: Some("HUGGINGFACE_API_KEY".into()),
            capability: Capability::Text,
            priority: 3,
            daily_limit: None,
            wire: WireFormat::TextGeneration,
            text_params: GenerationParams::new(0.7, 500),
            vision_params: GenerationParams::vision_default(),
        },
    ]
}
