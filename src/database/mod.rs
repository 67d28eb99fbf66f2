pub mod audio_file_repo;
pub mod connection;
pub mod embedding_repo;
pub mod migrations;
pub mod schema;
pub mod tts_request_repo;
pub mod voice_repo;

pub use audio_file_repo::AudioFileRepository;
pub use connection::DatabaseManager;
pub use embedding_repo::EmbeddingRepository;
pub use migrations::{Migration, MigrationManager};
pub use schema::{create_schema, SCHEMA_VERSION};
pub use tts_request_repo::TtsRequestRepository;
pub use voice_repo::VoiceRepository;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Row;

/// Parse a stored timestamp column, accepting RFC 3339 and the bare
/// `datetime('now')` format SQLite defaults write.
pub(crate) fn map_timestamp(
    row: &Row,
    index: usize,
    column: &str,
) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(index)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(DateTime::from_naive_utc_and_offset(parsed, Utc));
    }

    Err(rusqlite::Error::InvalidColumnType(
        index,
        column.to_string(),
        rusqlite::types::Type::Text,
    ))
}
