use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One synthesis request recorded for usage history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TtsRequest {
    pub id: i64,
    pub user_id: String,
    pub voice_id: String,
    pub input_text: String,
    pub model: String,
    pub audio_path: String,
    /// Output length in seconds, zero when unknown.
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

/// A usage record before the store assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTtsRequest {
    pub user_id: String,
    pub voice_id: String,
    pub input_text: String,
    pub model: String,
    pub audio_path: String,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

impl NewTtsRequest {
    pub fn new(
        user_id: String,
        voice_id: String,
        input_text: String,
        model: String,
        audio_path: String,
    ) -> Self {
        Self {
            user_id,
            voice_id,
            input_text,
            model,
            audio_path,
            duration: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn into_request(self, id: i64) -> TtsRequest {
        TtsRequest {
            id,
            user_id: self.user_id,
            voice_id: self.voice_id,
            input_text: self.input_text,
            model: self.model,
            audio_path: self.audio_path,
            duration: self.duration,
            created_at: self.created_at,
        }
    }
}
