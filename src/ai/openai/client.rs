use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Shared HTTP plumbing for the OpenAI-compatible endpoints. The base URL
/// comes from configuration so the same client talks to openai.com, an Azure
/// deployment, or a test server.
pub struct OpenAiHttpClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl OpenAiHttpClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(base_url, api_key, client)
    }

    pub fn new_with_client(base_url: String, api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Provider error (status {}): {}", status, error_text);
            return Err(Error::Provider(format!(
                "API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse provider response: {}\nBody: {}", e, body);
            Error::Provider(format!("Failed to parse provider response: {}", e))
        })
    }
}
