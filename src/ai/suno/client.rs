//! Long-polling client for the hosted music generation service.
//!
//! Jobs are submitted with lyrics, style, and title, then polled at a fixed
//! interval until the provider reports a terminal status or the attempt
//! budget runs out. There is no cancellation; the caller is blocked for up to
//! interval × attempts.

use crate::ai::MusicService;
use crate::models::{
    CreditsResponse, MusicGenerationRequest, MusicJob, MusicJobStatus, MusicSubmitResponse,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(10);
const MAX_POLL_ATTEMPTS: u32 = 30;

pub struct SunoMusicClient {
    client: Client,
    base_url: String,
    cookie: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl SunoMusicClient {
    pub fn new(base_url: String, cookie: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie,
            poll_interval: POLL_INTERVAL,
            max_poll_attempts: MAX_POLL_ATTEMPTS,
        }
    }

    #[cfg(test)]
    fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_poll_attempts = max_attempts;
        self
    }

    async fn get<Resp: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Cookie", &self.cookie)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(Error::Provider(format!(
                "Music API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::Provider(format!("Failed to parse music API response: {}", e))
        })
    }
}

#[async_trait]
impl MusicService for SunoMusicClient {
    async fn submit_job(&self, lyrics: &str, style: &str, title: &str) -> Result<String> {
        let request = MusicGenerationRequest {
            lyrics: lyrics.to_string(),
            style: style.to_string(),
            title: title.to_string(),
        };

        let url = format!("{}/api/custom_generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Cookie", &self.cookie)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(Error::Provider(format!(
                "Music API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let submitted: MusicSubmitResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Provider(format!("Failed to parse music submit response: {}", e))
        })?;

        info!("Submitted music job {}", submitted.id);
        Ok(submitted.id)
    }

    async fn poll_job(&self, job_id: &str) -> Result<MusicJob> {
        self.get(&format!("/api/get?id={}", job_id)).await
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<String> {
        for attempt in 1..=self.max_poll_attempts {
            let job = self.poll_job(job_id).await?;
            debug!(
                "Job {} poll {}/{}: {:?}",
                job_id, attempt, self.max_poll_attempts, job.status
            );

            match job.status {
                MusicJobStatus::Completed => {
                    let url = job.audio_url.ok_or_else(|| {
                        Error::Provider(format!(
                            "Job {} completed without an audio URL",
                            job_id
                        ))
                    })?;
                    info!("Job {} completed after {} polls", job_id, attempt);
                    return Ok(url);
                }
                MusicJobStatus::Failed => {
                    return Err(Error::Provider(format!(
                        "Music generation job {} failed",
                        job_id
                    )));
                }
                MusicJobStatus::Pending => {
                    // No sleep after the final poll; the loop exits straight
                    // into the timeout error.
                    if attempt < self.max_poll_attempts {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        }

        warn!(
            "Job {} still pending after {} polls",
            job_id, self.max_poll_attempts
        );
        Err(Error::PollTimeout {
            attempts: self.max_poll_attempts,
        })
    }

    async fn remaining_credits(&self) -> Result<u32> {
        let response: CreditsResponse = self.get("/api/get_credits").await?;
        Ok(response.credits_left)
    }
}
