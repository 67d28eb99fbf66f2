use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for an uploaded voice sample. The audio bytes live on disk at
/// `file_path`; only the metadata is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioFile {
    pub id: String,
    pub user_id: String,
    pub filename: String,
    pub file_path: String,
    pub file_size: u64,
    /// Sample length in seconds, zero when unknown.
    pub duration: f64,
    pub format: String,
    pub created_at: DateTime<Utc>,
}

impl AudioFile {
    pub fn new(
        user_id: String,
        filename: String,
        file_path: String,
        file_size: u64,
        duration: f64,
        format: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            filename,
            file_path,
            file_size,
            duration,
            format,
            created_at: Utc::now(),
        }
    }
}
