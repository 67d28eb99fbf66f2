use thiserror::Error;

/// Custom error types for the Voiceprint backend
#[derive(Error, Debug)]
pub enum VoiceprintError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Service error: {message}")]
    Service { message: String },
}

impl VoiceprintError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a service error
    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            VoiceprintError::Database(_) => "database",
            VoiceprintError::Io(_) => "io",
            VoiceprintError::Json(_) => "json",
            VoiceprintError::InvalidConfig { .. } => "config",
            VoiceprintError::Validation { .. } => "validation",
            VoiceprintError::NotFound { .. } => "not_found",
            VoiceprintError::Service { .. } => "service",
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VoiceprintError::Database(_) | VoiceprintError::Io(_)
        )
    }
}

/// Result type alias for Voiceprint
pub type Result<T> = std::result::Result<T, VoiceprintError>;
