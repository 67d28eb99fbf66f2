use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the derived embedding identifier, in hex characters.
const ID_LENGTH: usize = 32;

/// A stored embedding for one source audio file.
///
/// Immutable once created: the store keeps the first record written for a
/// given `file_id` and returns it unchanged on later saves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    pub id: String,
    pub file_id: String,
    pub vector: Vec<f64>,
    pub vector_hash: String,
    pub dimension: usize,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

impl Embedding {
    pub fn new(
        file_id: String,
        vector: Vec<f64>,
        vector_hash: String,
        model_version: String,
    ) -> Self {
        let id = Self::derive_id(&file_id, &vector_hash);
        let dimension = vector.len();
        Self {
            id,
            file_id,
            vector,
            vector_hash,
            dimension,
            model_version,
            created_at: Utc::now(),
        }
    }

    /// Derive the embedding identifier from its source file and vector
    /// fingerprint. The same (file, vector) pair always yields the same id.
    pub fn derive_id(file_id: &str, vector_hash: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(file_id.as_bytes());
        hasher.update(b"-");
        hasher.update(vector_hash.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..ID_LENGTH].to_string()
    }
}
