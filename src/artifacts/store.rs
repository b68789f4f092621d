use super::ArtifactStore;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::info;

const LYRICS_FILE: &str = "villancico.txt";
const IMAGE_FILE: &str = "ilustracion.png";
const AUDIO_FILE: &str = "villancico.mp3";
const MELODY_FILE: &str = "melodia.mid";

pub struct FsArtifactStore {
    client: Client,
    output_dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            client: Client::new(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn new_with_client(output_dir: &Path, client: Client) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            client,
            output_dir: output_dir.to_path_buf(),
        })
    }

    async fn fetch_and_write(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Failed to download {} (status {})",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let path = self.output_dir.join(file_name);
        std::fs::write(&path, &bytes)?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn save_lyrics(&self, lyrics: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(LYRICS_FILE);
        std::fs::write(&path, lyrics.as_bytes())?;
        info!("Saved {}", path.display());
        Ok(path)
    }

    async fn save_image(&self, url: &str) -> Result<PathBuf> {
        self.fetch_and_write(url, IMAGE_FILE).await
    }

    async fn save_audio(&self, url: &str) -> Result<PathBuf> {
        self.fetch_and_write(url, AUDIO_FILE).await
    }

    async fn save_melody(&self, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.output_dir.join(MELODY_FILE);
        std::fs::write(&path, bytes)?;
        info!("Saved {}", path.display());
        Ok(path)
    }
}
