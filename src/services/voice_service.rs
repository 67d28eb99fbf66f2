use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::embedding::EmbeddingService;
use crate::error::{Result, VoiceprintError};
use crate::models::Voice;
use crate::storage::{AudioFileStore, VoicePage, VoiceQuery, VoiceStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoiceRequest {
    pub user_id: String,
    pub file_id: String,
    pub model: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub sample_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVoiceRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Voice profile lifecycle: creation from an uploaded sample, lookup,
/// listing, update, and deletion.
#[derive(Clone)]
pub struct VoiceService {
    files: Arc<dyn AudioFileStore>,
    voices: Arc<dyn VoiceStore>,
    embeddings: EmbeddingService,
}

impl VoiceService {
    pub fn new(
        files: Arc<dyn AudioFileStore>,
        voices: Arc<dyn VoiceStore>,
        embeddings: EmbeddingService,
    ) -> Self {
        Self {
            files,
            voices,
            embeddings,
        }
    }

    /// Create a voice profile from an uploaded sample.
    ///
    /// Idempotent per `(file_id, model)`: retries return the existing
    /// profile. The sample's embedding is generated and persisted as part
    /// of this flow, and the persisted record's fingerprint is stamped on
    /// the profile as `embedding_hash`.
    pub async fn create_voice(&self, request: CreateVoiceRequest) -> Result<Voice> {
        if let Some(existing) = self
            .voices
            .find_by_file_and_model(&request.file_id, &request.model)
            .await?
        {
            info!(voice_id = %existing.id, file_id = %request.file_id, "Voice already exists");
            return Ok(existing);
        }

        let file = self
            .files
            .get(&request.file_id)
            .await?
            .ok_or_else(|| VoiceprintError::not_found(format!("audio file {}", request.file_id)))?;

        let embedding = self.embeddings.generate_and_save(&request.file_id).await?;

        // Provider-side voice registration lives outside this backend; the
        // profile is addressed by a locally minted token.
        let provider_voice_id = format!("local-{}", Uuid::new_v4());

        let mut voice = Voice::new(
            request.user_id,
            request.file_id,
            request.model,
            provider_voice_id,
            embedding.vector_hash,
        )
        .with_sample_audio_path(file.file_path);
        if let Some(name) = request.name {
            voice = voice.with_name(name);
        }
        if let Some(text) = request.text {
            voice = voice.with_text(text);
        }
        if let Some(sample_text) = request.sample_text {
            voice = voice.with_sample_text(sample_text);
        }

        let voice = self.voices.save(voice).await?;
        info!(
            voice_id = %voice.id,
            file_id = %voice.file_id,
            model = %voice.model,
            "Voice created"
        );
        Ok(voice)
    }

    pub async fn get_voice(&self, voice_id: &str) -> Result<Option<Voice>> {
        self.voices.get(voice_id).await
    }

    pub async fn list_voices(&self, query: &VoiceQuery) -> Result<VoicePage> {
        self.voices.list(query).await
    }

    /// Apply the supplied fields to an existing voice; absent fields are
    /// left untouched.
    pub async fn update_voice(&self, voice_id: &str, request: UpdateVoiceRequest) -> Result<Voice> {
        let mut voice = self
            .voices
            .get(voice_id)
            .await?
            .ok_or_else(|| VoiceprintError::not_found(format!("voice {voice_id}")))?;

        if let Some(name) = request.name {
            voice.set_name(Some(name));
        }
        if let Some(text) = request.text {
            voice.set_text(Some(text));
        }
        if let Some(metadata) = request.metadata {
            voice.set_metadata(Some(metadata));
        }

        self.voices.save(voice).await
    }

    /// Remove a voice and, best-effort, its sample audio from disk.
    ///
    /// Returns whether the voice existed.
    pub async fn delete_voice(&self, voice_id: &str) -> Result<bool> {
        let Some(voice) = self.voices.get(voice_id).await? else {
            return Ok(false);
        };

        if let Some(sample_path) = &voice.sample_audio_path {
            if Path::new(sample_path).exists() {
                if let Err(error) = std::fs::remove_file(sample_path) {
                    warn!(voice_id = %voice.id, path = %sample_path, %error, "Failed to delete sample audio");
                }
            }
        }

        self.voices.delete(voice_id).await
    }
}
