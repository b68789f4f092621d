//! Data models and structures
//!
//! Defines the core data structures for carol requests, generation results,
//! and API interactions with the text, image, and music providers.

use serde::{Deserialize, Serialize};

/// A single carol request as entered by the user. Built once per submission,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub child_name: Option<String>,
    pub child_age: Option<u8>,
}

impl GenerationRequest {
    pub fn new(topic: String) -> Self {
        Self {
            topic,
            child_name: None,
            child_age: None,
        }
    }

    pub fn for_child(topic: String, child_name: String, child_age: u8) -> Self {
        Self {
            topic,
            child_name: Some(child_name),
            child_age: Some(child_age),
        }
    }

    /// The personalized template is only used when both child fields are set.
    pub fn is_personalized(&self) -> bool {
        self.child_name.is_some() && self.child_age.is_some()
    }
}

/// Everything produced for one request: lyrics, illustration URL, and the
/// optional audio URL. Passed through the call chain instead of living in
/// ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Villancico {
    pub request: GenerationRequest,
    pub lyrics: String,
    pub image_url: String,
    pub audio_url: Option<String>,
}

// Chat completion API request/response models
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

// Image generation API request/response models
#[derive(Debug, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
}

// Music generation API models
#[derive(Debug, Serialize)]
pub struct MusicGenerationRequest {
    pub lyrics: String,
    pub style: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct MusicSubmitResponse {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicJobStatus {
    Pending,
    Completed,
    Failed,
}

impl MusicJobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MusicJobStatus::Pending)
    }
}

/// Snapshot of a music generation job, alive only for the duration of the
/// polling loop.
#[derive(Debug, Clone, Deserialize)]
pub struct MusicJob {
    pub id: String,
    pub status: MusicJobStatus,
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    pub credits_left: u32,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_base: String,
    pub openai_api_key: String,
    pub image_api_base: String,
    pub image_api_key: String,
    pub chat_model: String,
    pub image_model: String,
    pub music_api_base: Option<String>,
    pub music_cookie: Option<String>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable lookup. Tests drive this with a map
    /// instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let openai_api_base = lookup("OPENAI_API_BASE")
            .ok_or_else(|| crate::Error::Config("OPENAI_API_BASE not set".to_string()))?;
        let openai_api_key = lookup("OPENAI_API_KEY")
            .ok_or_else(|| crate::Error::Config("OPENAI_API_KEY not set".to_string()))?;

        // The image provider may live behind a second endpoint/key pair;
        // without one it shares the primary credentials.
        let image_api_base =
            lookup("OPENAI_API_BASE_2").unwrap_or_else(|| openai_api_base.clone());
        let image_api_key = lookup("OPENAI_API_KEY_2").unwrap_or_else(|| openai_api_key.clone());

        Ok(Self {
            openai_api_base,
            openai_api_key,
            image_api_base,
            image_api_key,
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            image_model: lookup("IMAGE_MODEL").unwrap_or_else(|| "dall-e-3".to_string()),
            music_api_base: lookup("MUSIC_API_BASE"),
            music_cookie: lookup("MUSIC_COOKIE"),
        })
    }

    /// Music generation needs both its endpoint and session cookie.
    pub fn music_configured(&self) -> bool {
        self.music_api_base.is_some() && self.music_cookie.is_some()
    }
}
