//! Embedding generation and persistence.
//!
//! The generator derives deterministic unit vectors from file identifiers;
//! the service persists one embedding per file through a storage trait.

mod generator;
mod service;

pub use generator::{EmbeddingGenerator, GeneratedEmbedding, DEFAULT_DIMENSION, MODEL_VERSION};
pub use service::EmbeddingService;
