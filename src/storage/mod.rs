//! Storage traits and backends.
//!
//! Each entity is persisted through a small trait so the service layer is
//! storage-agnostic; backends are selected at construction time. Two are
//! provided: [`MemoryStorage`] and the SQLite repositories in
//! [`crate::database`].

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AudioFile, Embedding, NewTtsRequest, TtsRequest, Voice};

pub use memory::MemoryStorage;

const DEFAULT_PAGE_SIZE: usize = 20;

/// Keyed, idempotent persistence of one embedding per source file.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Insert-or-fetch keyed by `file_id`.
    ///
    /// First write wins: when a record already exists for the file it is
    /// returned verbatim and the supplied record is discarded. The
    /// check-then-insert sequence must behave atomically per `file_id`;
    /// two concurrent saves for a new file must not both insert.
    async fn save(&self, embedding: Embedding) -> Result<Embedding>;

    /// Pure lookup by `file_id`.
    async fn get(&self, file_id: &str) -> Result<Option<Embedding>>;
}

/// Persistence for uploaded sample metadata.
#[async_trait]
pub trait AudioFileStore: Send + Sync {
    async fn save(&self, file: AudioFile) -> Result<AudioFile>;
    async fn get(&self, file_id: &str) -> Result<Option<AudioFile>>;
    /// Remove the record; returns whether it existed.
    async fn delete(&self, file_id: &str) -> Result<bool>;
}

/// Filters and paging for voice listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Case-insensitive match against id, provider voice id, and name.
    pub search: Option<String>,
    pub user_id: Option<String>,
}

impl VoiceQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        match self.limit {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(limit) => limit,
        }
    }

    pub fn offset(&self) -> usize {
        (self.page() - 1) * self.limit()
    }
}

/// One page of voices plus the total count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicePage {
    pub voices: Vec<Voice>,
    pub total: usize,
}

/// Persistence for voice profiles.
#[async_trait]
pub trait VoiceStore: Send + Sync {
    /// Insert or replace by voice id.
    async fn save(&self, voice: Voice) -> Result<Voice>;
    async fn get(&self, voice_id: &str) -> Result<Option<Voice>>;
    /// The idempotency lookup for voice creation.
    async fn find_by_file_and_model(&self, file_id: &str, model: &str) -> Result<Option<Voice>>;
    /// List voices newest-first with filters and paging.
    async fn list(&self, query: &VoiceQuery) -> Result<VoicePage>;
    /// Remove the record; returns whether it existed.
    async fn delete(&self, voice_id: &str) -> Result<bool>;
}

/// Append-only ledger of synthesis requests.
#[async_trait]
pub trait TtsUsageStore: Send + Sync {
    async fn append(&self, record: NewTtsRequest) -> Result<TtsRequest>;
    /// A user's most recent requests, newest first.
    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<TtsRequest>>;
}
