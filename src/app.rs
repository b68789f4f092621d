//! Application orchestration for generating a carol end to end.

use crate::ai::{
    IllustrationService, LyricsService, MusicService, OpenAiImageClient, OpenAiLyricsClient,
    SunoMusicClient,
};
use crate::artifacts::{ArtifactStore, FsArtifactStore};
use crate::models::{Config, GenerationRequest, Villancico};
use crate::{melody, prompts, Error, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Coordinates lyrics, illustration, and melody generation for one request.
///
/// Calls are issued strictly in sequence: lyrics, then illustration, then
/// music. Each result is saved before the next call starts, so a late failure
/// still leaves the earlier artifacts on disk.
pub struct App {
    lyrics: Box<dyn LyricsService>,
    illustration: Box<dyn IllustrationService>,
    music: Option<Box<dyn MusicService>>,
    store: Box<dyn ArtifactStore>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("music", &self.music.is_some())
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub lyrics: Box<dyn LyricsService>,
    pub illustration: Box<dyn IllustrationService>,
    pub music: Option<Box<dyn MusicService>>,
    pub store: Box<dyn ArtifactStore>,
}

/// Paths of everything one run produced, plus the generated content itself.
#[derive(Debug)]
pub struct RunOutcome {
    pub villancico: Villancico,
    pub lyrics_path: PathBuf,
    pub image_path: PathBuf,
    pub audio_path: Option<PathBuf>,
    pub melody_path: Option<PathBuf>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: AppServices, output_dir: PathBuf) -> Self {
        Self {
            lyrics: services.lyrics,
            illustration: services.illustration,
            music: services.music,
            store: services.store,
            output_dir,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    ///
    /// When `enable_music` is set, the music endpoint and cookie must be
    /// configured; their absence is a setup error, not a crash.
    pub fn new(output_root: &Path, enable_music: bool) -> Result<Self> {
        Self::with_config(Config::from_env()?, output_root, enable_music)
    }

    /// Construct an app from an already-built configuration.
    pub fn with_config(config: Config, output_root: &Path, enable_music: bool) -> Result<Self> {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let session_id = Uuid::new_v4();
        let output_dir = output_root.join(format!("{}_{}", date, session_id));
        info!("Output directory: {}", output_dir.display());

        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let lyrics: Box<dyn LyricsService> = Box::new(OpenAiLyricsClient::new_with_client(
            config.openai_api_base.clone(),
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        ));

        let illustration: Box<dyn IllustrationService> = Box::new(
            OpenAiImageClient::new_with_client(
                config.image_api_base.clone(),
                config.image_api_key.clone(),
                config.image_model.clone(),
                http_client.clone(),
            ),
        );

        let music: Option<Box<dyn MusicService>> = if enable_music {
            let base = config.music_api_base.clone().ok_or_else(|| {
                Error::Config("MUSIC_API_BASE not set (required with --music)".to_string())
            })?;
            let cookie = config.music_cookie.clone().ok_or_else(|| {
                Error::Config("MUSIC_COOKIE not set (required with --music)".to_string())
            })?;
            Some(Box::new(SunoMusicClient::new(base, cookie)))
        } else {
            None
        };

        let store = Box::new(FsArtifactStore::new_with_client(&output_dir, http_client)?);

        Ok(Self::with_services(
            AppServices {
                lyrics,
                illustration,
                music,
                store,
            },
            output_dir,
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the full generation pipeline for one request.
    pub async fn run(&self, request: &GenerationRequest) -> Result<RunOutcome> {
        info!("Generating villancico about '{}'", request.topic);

        let lyrics_prompt = prompts::build_lyrics_prompt(request);
        let lyrics = self.lyrics.generate_lyrics(&lyrics_prompt).await?;
        info!("Generated lyrics ({} chars)", lyrics.len());
        let lyrics_path = self.store.save_lyrics(&lyrics).await?;

        let image_prompt = prompts::build_image_prompt(&request.topic);
        let image_url = self.illustration.generate_image(&image_prompt).await?;
        info!("Generated illustration: {}", image_url);
        let image_path = self.store.save_image(&image_url).await?;

        let (audio_url, audio_path, melody_path) = match &self.music {
            Some(music) => {
                let credits = music.remaining_credits().await?;
                info!("Music credits remaining: {}", credits);
                if credits == 0 {
                    return Err(Error::Provider(
                        "No music generation credits remaining".to_string(),
                    ));
                }

                let title = prompts::build_music_title(&request.topic);
                let url = music
                    .compose(&lyrics, prompts::MUSIC_STYLE.trim(), title.trim())
                    .await?;
                info!("Composed melody: {}", url);
                let path = self.store.save_audio(&url).await?;
                (Some(url), Some(path), None)
            }
            None => {
                // Fixed-scale stand-in; it does not use the lyrics.
                warn!("No music service configured, writing placeholder melody");
                let bytes = melody::placeholder_melody()?;
                let path = self.store.save_melody(&bytes).await?;
                (None, None, Some(path))
            }
        };

        info!("Generation complete: {}", self.output_dir.display());
        Ok(RunOutcome {
            villancico: Villancico {
                request: request.clone(),
                lyrics,
                image_url,
                audio_url,
            },
            lyrics_path,
            image_path,
            audio_path,
            melody_path,
        })
    }
}
