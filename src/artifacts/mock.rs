use super::ArtifactStore;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// In-memory artifact store. Saves nothing to disk; records what was saved
/// so tests can assert on content. Clones share the recorded state.
#[derive(Clone)]
pub struct MockArtifactStore {
    base_path: PathBuf,
    saved: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockArtifactStore {
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("/mock/output"),
            saved: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_base_path(mut self, base_path: PathBuf) -> Self {
        self.base_path = base_path;
        self
    }

    pub fn saved_content(&self, file_name: &str) -> Option<Vec<u8>> {
        self.saved.lock().unwrap().get(file_name).cloned()
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    fn record(&self, file_name: &str, content: Vec<u8>) -> PathBuf {
        self.saved
            .lock()
            .unwrap()
            .insert(file_name.to_string(), content);
        self.base_path.join(file_name)
    }
}

impl Default for MockArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStore for MockArtifactStore {
    async fn save_lyrics(&self, lyrics: &str) -> Result<PathBuf> {
        Ok(self.record("villancico.txt", lyrics.as_bytes().to_vec()))
    }

    async fn save_image(&self, url: &str) -> Result<PathBuf> {
        Ok(self.record("ilustracion.png", url.as_bytes().to_vec()))
    }

    async fn save_audio(&self, url: &str) -> Result<PathBuf> {
        Ok(self.record("villancico.mp3", url.as_bytes().to_vec()))
    }

    async fn save_melody(&self, bytes: &[u8]) -> Result<PathBuf> {
        Ok(self.record("melodia.mid", bytes.to_vec()))
    }
}
