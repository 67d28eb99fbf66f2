//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "VOICEPRINT_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "VOICEPRINT_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Database configuration
pub mod database {
    /// SQLite database file path
    pub const DB_PATH: &str = "VOICEPRINT_DB_PATH";
}

/// Sample storage configuration
pub mod storage {
    /// Directory for uploaded voice sample audio
    pub const STORAGE_DIR: &str = "VOICEPRINT_STORAGE_DIR";
}

/// Embedding configuration
pub mod embedding {
    /// Embedding vector dimension. Must stay fixed for the lifetime of a
    /// deployment's stored data; regenerating under a different dimension
    /// produces different vectors and hashes.
    pub const DIMENSION: &str = "VOICEPRINT_EMBEDDING_DIMENSION";
}
