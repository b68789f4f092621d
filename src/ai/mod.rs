//! AI provider integration for lyrics, illustration, and music generation
//!
//! Each capability is a small trait with interchangeable implementations: the
//! OpenAI-backed clients for text and images, the long-polling Suno-style
//! client for music, and in-memory mocks for tests.

pub mod mock;
pub mod openai;
pub mod suno;

pub use mock::{MockIllustrationClient, MockLyricsClient, MockMusicClient};
pub use openai::{OpenAiImageClient, OpenAiLyricsClient};
pub use suno::SunoMusicClient;

use crate::models::MusicJob;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LyricsService: Send + Sync {
    /// Generate carol lyrics for a prompt. Returns the first completion's
    /// text verbatim.
    async fn generate_lyrics(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait IllustrationService: Send + Sync {
    /// Generate an illustration for a prompt. Returns a provider-hosted URL;
    /// fetching the bytes is the caller's job.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait MusicService: Send + Sync {
    /// Submit a generation job and return its identifier.
    async fn submit_job(&self, lyrics: &str, style: &str, title: &str) -> Result<String>;

    /// Fetch the current state of a job.
    async fn poll_job(&self, job_id: &str) -> Result<MusicJob>;

    /// Poll a job at a fixed interval until it completes, fails, or the
    /// attempt budget runs out. Returns the audio URL on completion.
    async fn wait_for_completion(&self, job_id: &str) -> Result<String>;

    /// Remaining generation quota on the account.
    async fn remaining_credits(&self) -> Result<u32>;

    /// Submit a job and block until its audio URL is available.
    async fn compose(&self, lyrics: &str, style: &str, title: &str) -> Result<String> {
        let job_id = self.submit_job(lyrics, style, title).await?;
        self.wait_for_completion(&job_id).await
    }
}
