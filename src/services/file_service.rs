use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::AudioFile;
use crate::storage::AudioFileStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFileRequest {
    pub user_id: String,
    pub filename: String,
    pub file_path: String,
    pub file_size: u64,
    /// Sample length in seconds, zero when unknown.
    pub duration: f64,
    pub format: String,
}

/// Manages uploaded voice sample metadata.
#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn AudioFileStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn AudioFileStore>) -> Self {
        Self { store }
    }

    /// Record metadata for a sample already written to disk.
    pub async fn register(&self, request: RegisterFileRequest) -> Result<AudioFile> {
        let file = AudioFile::new(
            request.user_id,
            request.filename,
            request.file_path,
            request.file_size,
            request.duration,
            request.format,
        );
        let file = self.store.save(file).await?;
        info!(file_id = %file.id, filename = %file.filename, "Audio file registered");
        Ok(file)
    }

    pub async fn get(&self, file_id: &str) -> Result<Option<AudioFile>> {
        self.store.get(file_id).await
    }

    /// Remove the sample from disk and drop its record.
    ///
    /// Returns whether a record existed. A failed disk removal is logged
    /// and does not block dropping the record.
    pub async fn delete(&self, file_id: &str) -> Result<bool> {
        let Some(file) = self.store.get(file_id).await? else {
            return Ok(false);
        };

        if Path::new(&file.file_path).exists() {
            if let Err(error) = std::fs::remove_file(&file.file_path) {
                warn!(file_id = %file.id, path = %file.file_path, %error, "Failed to delete sample audio");
            }
        }

        self.store.delete(file_id).await
    }
}
