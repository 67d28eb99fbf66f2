use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, VoiceprintError};
use crate::models::{NewTtsRequest, TtsRequest};
use crate::storage::{TtsUsageStore, VoiceStore};

const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordTtsRequest {
    pub user_id: String,
    pub voice_id: String,
    pub input_text: String,
    pub model: String,
    pub audio_path: String,
}

/// Synthesis usage ledger: records requests and serves per-user history.
///
/// Synthesis itself happens elsewhere; this service only accounts for it.
#[derive(Clone)]
pub struct TtsRequestService {
    voices: Arc<dyn VoiceStore>,
    usage: Arc<dyn TtsUsageStore>,
}

impl TtsRequestService {
    pub fn new(voices: Arc<dyn VoiceStore>, usage: Arc<dyn TtsUsageStore>) -> Self {
        Self { voices, usage }
    }

    /// Record one synthesis request against an existing voice.
    pub async fn record(&self, request: RecordTtsRequest) -> Result<TtsRequest> {
        self.voices
            .get(&request.voice_id)
            .await?
            .ok_or_else(|| VoiceprintError::not_found(format!("voice {}", request.voice_id)))?;

        let record = self
            .usage
            .append(NewTtsRequest::new(
                request.user_id,
                request.voice_id,
                request.input_text,
                request.model,
                request.audio_path,
            ))
            .await?;

        info!(
            request_id = record.id,
            voice_id = %record.voice_id,
            "TTS request recorded"
        );
        Ok(record)
    }

    /// A user's most recent requests, newest first.
    pub async fn history(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<TtsRequest>> {
        self.usage
            .history(user_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }
}
