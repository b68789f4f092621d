//! Artifact persistence for generated content
//!
//! Handles saving lyrics, illustrations, and audio to the run's output
//! directory, fetching provider-hosted files where only a URL was returned.

pub mod mock;
pub mod store;

pub use mock::MockArtifactStore;
pub use store::FsArtifactStore;

use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write the lyrics exactly as generated. The saved file must reproduce
    /// the string byte-for-byte.
    async fn save_lyrics(&self, lyrics: &str) -> Result<PathBuf>;

    /// Fetch the illustration from its provider URL and write the PNG bytes.
    async fn save_image(&self, url: &str) -> Result<PathBuf>;

    /// Fetch the composed audio from its provider URL and write the bytes.
    async fn save_audio(&self, url: &str) -> Result<PathBuf>;

    /// Write locally produced MIDI bytes.
    async fn save_melody(&self, bytes: &[u8]) -> Result<PathBuf>;
}
