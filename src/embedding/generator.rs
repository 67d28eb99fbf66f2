//! Deterministic embedding generation for voice sample files.
//!
//! Vectors are a seeded pseudo-random placeholder, not model output: the
//! file identifier seeds a linear congruential generator and the result is
//! L2-normalized. The same identifier always produces bit-identical
//! vectors across processes and platforms.

use sha2::{Digest, Sha256};

use crate::error::{Result, VoiceprintError};

/// Default embedding dimension when not configured.
pub const DEFAULT_DIMENSION: usize = 256;

/// Tag identifying the generation scheme recorded on stored vectors.
pub const MODEL_VERSION: &str = "random-v1";

const LCG_MULTIPLIER: f64 = 1_103_515_245.0;
const LCG_INCREMENT: f64 = 12_345.0;
/// 2^31; generator states are reduced into [0, 2^31).
const STATE_MODULUS: f64 = 2_147_483_648.0;
/// 2^31 - 1; scales states into [0, 1].
const STATE_MAX: f64 = 2_147_483_647.0;

/// A freshly generated vector and its content fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedEmbedding {
    pub vector: Vec<f64>,
    pub vector_hash: String,
}

/// Derives fixed-dimension unit vectors from file identifiers.
///
/// Pure and stateless: no I/O, no shared state, any string is a valid
/// identifier. The dimension is fixed at construction and must match the
/// dimension of previously stored vectors.
#[derive(Debug, Clone)]
pub struct EmbeddingGenerator {
    dimension: usize,
}

impl EmbeddingGenerator {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VoiceprintError::validation(
                "dimension",
                "embedding dimension must be at least 1",
            ));
        }
        Ok(Self { dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Generate the embedding for `file_id`.
    ///
    /// Deterministic: repeated calls return bit-identical vectors and the
    /// same fingerprint.
    pub fn generate(&self, file_id: &str) -> GeneratedEmbedding {
        let seed = Self::seed(file_id);
        let mut vector = Self::raw_vector(seed, self.dimension);
        Self::normalize(&mut vector);
        let vector_hash = Self::fingerprint(&vector);
        GeneratedEmbedding {
            vector,
            vector_hash,
        }
    }

    /// Hash a file identifier to a non-negative 32-bit seed.
    ///
    /// Polynomial rolling hash over the UTF-16 code units with two's
    /// complement 32-bit wraparound; the empty string seeds to 0.
    fn seed(file_id: &str) -> u32 {
        let mut hash: i32 = 0;
        for unit in file_id.encode_utf16() {
            hash = hash
                .wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit));
        }
        hash.unsigned_abs()
    }

    /// Run the LCG for `dimension` steps, mapping each state into [-1, 1].
    ///
    /// The multiply-accumulate runs in doubles: states stay below 2^31 but
    /// the intermediate product passes 2^53, and stored fingerprints depend
    /// on that rounding, so the arithmetic must not be moved to integers.
    fn raw_vector(seed: u32, dimension: usize) -> Vec<f64> {
        let mut state = f64::from(seed);
        let mut vector = Vec::with_capacity(dimension);
        for _ in 0..dimension {
            state = (state * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(STATE_MODULUS);
            vector.push(state / STATE_MAX * 2.0 - 1.0);
        }
        vector
    }

    /// Scale the vector to unit Euclidean length.
    ///
    /// The norm cannot be zero for a non-empty vector: no reachable LCG
    /// state maps a component to exactly 0.
    fn normalize(vector: &mut [f64]) {
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        for component in vector.iter_mut() {
            *component /= norm;
        }
    }

    /// Compute the content fingerprint of a vector.
    ///
    /// SHA-256 over the little-endian bytes of the single-precision
    /// projection of the vector. Persisted hashes were computed over the f32
    /// truncation; widening the hash input would invalidate all of them.
    pub fn fingerprint(vector: &[f64]) -> String {
        let mut hasher = Sha256::new();
        for component in vector {
            hasher.update((*component as f32).to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
