use super::client::OpenAiHttpClient;
use crate::ai::IllustrationService;
use crate::models::{ImageGenerationRequest, ImageGenerationResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: OpenAiHttpClient::new(base_url, api_key, Duration::from_secs(60)),
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
impl IllustrationService for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        };

        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        let image_data = response
            .data
            .first()
            .ok_or_else(|| Error::Provider("No image data in response".to_string()))?;

        image_data
            .url
            .clone()
            .ok_or_else(|| Error::Provider("No image URL in response".to_string()))
    }
}
