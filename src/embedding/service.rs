//! Embedding service tying the generator to a pluggable store.

use std::sync::Arc;

use tracing::debug;

use super::generator::{EmbeddingGenerator, GeneratedEmbedding, MODEL_VERSION};
use crate::error::Result;
use crate::models::Embedding;
use crate::storage::EmbeddingStore;

/// Service for generating and persisting file embeddings.
///
/// The generator is pure; the store is the only stateful dependency and is
/// injected at construction, so a service value can be shared freely.
#[derive(Clone)]
pub struct EmbeddingService {
    generator: EmbeddingGenerator,
    store: Arc<dyn EmbeddingStore>,
}

impl EmbeddingService {
    pub fn new(store: Arc<dyn EmbeddingStore>, dimension: usize) -> Result<Self> {
        let generator = EmbeddingGenerator::new(dimension)?;
        Ok(Self { generator, store })
    }

    pub fn dimension(&self) -> usize {
        self.generator.dimension()
    }

    /// Generate the vector and fingerprint for `file_id` without persisting.
    pub fn generate(&self, file_id: &str) -> GeneratedEmbedding {
        self.generator.generate(file_id)
    }

    /// Persist a generated embedding, create-or-fetch keyed by `file_id`.
    ///
    /// If a record already exists for the file the stored record is returned
    /// unchanged, regardless of the vector and hash supplied here.
    pub async fn save(
        &self,
        file_id: &str,
        vector: Vec<f64>,
        vector_hash: String,
        model_version: Option<String>,
    ) -> Result<Embedding> {
        let embedding = Embedding::new(
            file_id.to_string(),
            vector,
            vector_hash,
            model_version.unwrap_or_else(|| MODEL_VERSION.to_string()),
        );
        let saved = self.store.save(embedding).await?;
        debug!(
            file_id = %saved.file_id,
            embedding_id = %saved.id,
            dimension = saved.dimension,
            "Embedding saved"
        );
        Ok(saved)
    }

    /// Generate and persist in one step; the voice-creation entry point.
    pub async fn generate_and_save(&self, file_id: &str) -> Result<Embedding> {
        let generated = self.generator.generate(file_id);
        self.save(file_id, generated.vector, generated.vector_hash, None)
            .await
    }

    /// Look up the stored embedding for `file_id`.
    pub async fn get(&self, file_id: &str) -> Result<Option<Embedding>> {
        self.store.get(file_id).await
    }
}
