use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cloned voice profile derived from one audio sample.
///
/// `embedding_hash` is the content fingerprint of the sample's stored
/// embedding; `provider_voice_id` is the token a synthesis provider would
/// address this voice by (locally generated in this deployment).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voice {
    pub id: Uuid,
    pub user_id: String,
    pub name: Option<String>,
    pub provider_voice_id: String,
    pub file_id: String,
    pub model: String,
    pub text: Option<String>,
    pub sample_text: Option<String>,
    pub sample_audio_path: Option<String>,
    pub embedding_hash: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voice {
    pub fn new(
        user_id: String,
        file_id: String,
        model: String,
        provider_voice_id: String,
        embedding_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: None,
            provider_voice_id,
            file_id,
            model,
            text: None,
            sample_text: None,
            sample_audio_path: None,
            embedding_hash,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_sample_text(mut self, sample_text: String) -> Self {
        self.sample_text = Some(sample_text);
        self
    }

    pub fn with_sample_audio_path(mut self, path: String) -> Self {
        self.sample_audio_path = Some(path);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
        self.updated_at = Utc::now();
    }

    pub fn set_metadata(&mut self, metadata: Option<serde_json::Value>) {
        self.metadata = metadata;
        self.updated_at = Utc::now();
    }
}
