//! Application configuration resolved from the environment
//!
//! All settings have defaults suitable for a single-user deployment under
//! the home directory. The embedding dimension must stay fixed once data
//! has been stored; see the embedding module.

use std::env;
use std::path::PathBuf;

use crate::embedding::DEFAULT_DIMENSION;
use crate::error::{Result, VoiceprintError};

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path
    pub database_path: PathBuf,
    /// Directory holding uploaded voice sample audio
    pub storage_dir: PathBuf,
    /// Embedding vector dimension
    pub embedding_dimension: usize,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults under `~/.voiceprint/`.
    pub fn from_env() -> Result<Self> {
        let database_path = match env::var(crate::env::database::DB_PATH) {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_data_dir()?.join("voiceprint.db"),
        };

        let storage_dir = match env::var(crate::env::storage::STORAGE_DIR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?.join("samples"),
        };

        let embedding_dimension = match env::var(crate::env::embedding::DIMENSION) {
            Ok(raw) => {
                let dimension: usize = raw.parse().map_err(|_| {
                    VoiceprintError::invalid_config(format!(
                        "{} must be a positive integer, got: {raw}",
                        crate::env::embedding::DIMENSION
                    ))
                })?;
                if dimension == 0 {
                    return Err(VoiceprintError::invalid_config(format!(
                        "{} must be at least 1",
                        crate::env::embedding::DIMENSION
                    )));
                }
                dimension
            }
            Err(_) => DEFAULT_DIMENSION,
        };

        Ok(Self {
            database_path,
            storage_dir,
            embedding_dimension,
        })
    }
}

/// Get the voiceprint data directory path (`~/.voiceprint`)
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| VoiceprintError::invalid_config("Could not find home directory"))?;
    Ok(home_dir.join(".voiceprint"))
}
