//! In-memory storage backend.
//!
//! Backs all entity stores with plain maps behind one mutex; useful for
//! tests and for running without a database file. The single lock spans
//! every check-then-insert sequence, so the idempotency contracts hold
//! under concurrent callers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    AudioFileStore, EmbeddingStore, TtsUsageStore, VoicePage, VoiceQuery, VoiceStore,
};
use crate::error::Result;
use crate::models::{AudioFile, Embedding, NewTtsRequest, TtsRequest, Voice};

#[derive(Debug, Default)]
struct State {
    files: HashMap<String, AudioFile>,
    embeddings: HashMap<String, Embedding>,
    voices: HashMap<Uuid, Voice>,
    tts_requests: Vec<TtsRequest>,
    next_tts_id: i64,
}

/// Map-backed implementation of every storage trait.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmbeddingStore for MemoryStorage {
    async fn save(&self, embedding: Embedding) -> Result<Embedding> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.embeddings.get(&embedding.file_id) {
            return Ok(existing.clone());
        }
        state
            .embeddings
            .insert(embedding.file_id.clone(), embedding.clone());
        Ok(embedding)
    }

    async fn get(&self, file_id: &str) -> Result<Option<Embedding>> {
        let state = self.state.lock().unwrap();
        Ok(state.embeddings.get(file_id).cloned())
    }
}

#[async_trait]
impl AudioFileStore for MemoryStorage {
    async fn save(&self, file: AudioFile) -> Result<AudioFile> {
        let mut state = self.state.lock().unwrap();
        state.files.insert(file.id.clone(), file.clone());
        Ok(file)
    }

    async fn get(&self, file_id: &str) -> Result<Option<AudioFile>> {
        let state = self.state.lock().unwrap();
        Ok(state.files.get(file_id).cloned())
    }

    async fn delete(&self, file_id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.files.remove(file_id).is_some())
    }
}

#[async_trait]
impl VoiceStore for MemoryStorage {
    async fn save(&self, voice: Voice) -> Result<Voice> {
        let mut state = self.state.lock().unwrap();
        state.voices.insert(voice.id, voice.clone());
        Ok(voice)
    }

    async fn get(&self, voice_id: &str) -> Result<Option<Voice>> {
        let Ok(id) = Uuid::parse_str(voice_id) else {
            return Ok(None);
        };
        let state = self.state.lock().unwrap();
        Ok(state.voices.get(&id).cloned())
    }

    async fn find_by_file_and_model(&self, file_id: &str, model: &str) -> Result<Option<Voice>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .voices
            .values()
            .find(|voice| voice.file_id == file_id && voice.model == model)
            .cloned())
    }

    async fn list(&self, query: &VoiceQuery) -> Result<VoicePage> {
        let state = self.state.lock().unwrap();
        let mut voices: Vec<Voice> = state
            .voices
            .values()
            .filter(|voice| {
                query
                    .user_id
                    .as_ref()
                    .map_or(true, |user_id| &voice.user_id == user_id)
            })
            .filter(|voice| {
                query.search.as_ref().map_or(true, |search| {
                    let needle = search.to_lowercase();
                    voice.id.to_string().to_lowercase().contains(&needle)
                        || voice.provider_voice_id.to_lowercase().contains(&needle)
                        || voice
                            .name
                            .as_ref()
                            .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
            })
            .cloned()
            .collect();

        let total = voices.len();
        voices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let page: Vec<Voice> = voices
            .into_iter()
            .skip(query.offset())
            .take(query.limit())
            .collect();

        Ok(VoicePage {
            voices: page,
            total,
        })
    }

    async fn delete(&self, voice_id: &str) -> Result<bool> {
        let Ok(id) = Uuid::parse_str(voice_id) else {
            return Ok(false);
        };
        let mut state = self.state.lock().unwrap();
        Ok(state.voices.remove(&id).is_some())
    }
}

#[async_trait]
impl TtsUsageStore for MemoryStorage {
    async fn append(&self, record: NewTtsRequest) -> Result<TtsRequest> {
        let mut state = self.state.lock().unwrap();
        state.next_tts_id += 1;
        let request = record.into_request(state.next_tts_id);
        state.tts_requests.push(request.clone());
        Ok(request)
    }

    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<TtsRequest>> {
        let state = self.state.lock().unwrap();
        let mut requests: Vec<TtsRequest> = state
            .tts_requests
            .iter()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests.truncate(limit);
        Ok(requests)
    }
}
