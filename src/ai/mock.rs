use super::{IllustrationService, LyricsService, MusicService};
use crate::models::{MusicJob, MusicJobStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockLyricsClient {
    responses: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockLyricsClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_lyrics_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockLyricsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LyricsService for MockLyricsClient {
    async fn generate_lyrics(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("Un villancico sobre {}", prompt))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

pub struct MockIllustrationClient {
    responses: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockIllustrationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_url(self, url: String) -> Self {
        self.responses.lock().unwrap().push(url);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockIllustrationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IllustrationService for MockIllustrationClient {
    async fn generate_image(&self, _prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("https://mock.example/illustration.png".to_string())
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Scripted music service. Each call to `poll_job` consumes the next status
/// in the script; `wait_for_completion` drives the same script without
/// sleeping so tests stay fast.
pub struct MockMusicClient {
    statuses: Arc<Mutex<Vec<MusicJobStatus>>>,
    audio_url: Arc<Mutex<String>>,
    credits: Arc<Mutex<u32>>,
    poll_count: Arc<Mutex<usize>>,
}

impl MockMusicClient {
    pub fn new() -> Self {
        Self {
            statuses: Arc::new(Mutex::new(Vec::new())),
            audio_url: Arc::new(Mutex::new("https://mock.example/melody.mp3".to_string())),
            credits: Arc::new(Mutex::new(10)),
            poll_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_status(self, status: MusicJobStatus) -> Self {
        self.statuses.lock().unwrap().push(status);
        self
    }

    pub fn with_audio_url(self, url: String) -> Self {
        *self.audio_url.lock().unwrap() = url;
        self
    }

    pub fn with_credits(self, credits: u32) -> Self {
        *self.credits.lock().unwrap() = credits;
        self
    }

    pub fn get_poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }

    fn next_status(&self) -> MusicJobStatus {
        let mut count = self.poll_count.lock().unwrap();
        *count += 1;

        let statuses = self.statuses.lock().unwrap();
        if statuses.is_empty() {
            MusicJobStatus::Completed
        } else {
            // Past the end of the script the final status repeats.
            let index = (*count - 1).min(statuses.len() - 1);
            statuses[index]
        }
    }
}

impl Default for MockMusicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MusicService for MockMusicClient {
    async fn submit_job(&self, _lyrics: &str, _style: &str, _title: &str) -> Result<String> {
        Ok("mock-job-1".to_string())
    }

    async fn poll_job(&self, job_id: &str) -> Result<MusicJob> {
        let status = self.next_status();
        Ok(MusicJob {
            id: job_id.to_string(),
            status,
            audio_url: match status {
                MusicJobStatus::Completed => Some(self.audio_url.lock().unwrap().clone()),
                _ => None,
            },
        })
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<String> {
        // Same 30-attempt budget as the real client, minus the sleeps.
        for _ in 0..30 {
            let job = self.poll_job(job_id).await?;
            match job.status {
                MusicJobStatus::Completed => {
                    return job.audio_url.ok_or_else(|| {
                        Error::Provider("Mock job completed without URL".to_string())
                    });
                }
                MusicJobStatus::Failed => {
                    return Err(Error::Provider(format!("Mock job {} failed", job_id)));
                }
                MusicJobStatus::Pending => {}
            }
        }
        Err(Error::PollTimeout { attempts: 30 })
    }

    async fn remaining_credits(&self) -> Result<u32> {
        Ok(*self.credits.lock().unwrap())
    }
}
