use super::client::OpenAiHttpClient;
use crate::ai::LyricsService;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiLyricsClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiLyricsClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: OpenAiHttpClient::new(base_url, api_key, Duration::from_secs(30)),
            model,
        }
    }

    pub fn new_with_client(
        base_url: String,
        api_key: String,
        model: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(base_url, api_key, client),
            model,
        }
    }
}

#[async_trait]
impl LyricsService for OpenAiLyricsClient {
    async fn generate_lyrics(&self, prompt: &str) -> Result<String> {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(prompts::LYRICS_SYSTEM.to_string()),
        };

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(prompt.to_string()),
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![system_message, user_message],
            max_tokens: 500,
        };

        let response: ChatCompletionResponse =
            self.http.post("/v1/chat/completions", &request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::Provider("No completion in chat response".to_string()))
    }
}
