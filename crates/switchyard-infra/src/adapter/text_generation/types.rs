//! Hugging Face text-generation inference wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationRequest {
    pub inputs: String,
    pub parameters: TextGenerationParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub return_full_text: bool,
}

/// The endpoint answers with either a one-element array or a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    #[serde(default)]
    pub generated_text: Option<String>,
}
