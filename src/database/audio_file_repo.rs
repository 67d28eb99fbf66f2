use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::database::connection::DatabaseManager;
use crate::database::map_timestamp;
use crate::error::Result;
use crate::models::AudioFile;
use crate::storage::AudioFileStore;

const COLUMNS: &str = "id, user_id, filename, file_path, file_size, duration, format, created_at";

pub struct AudioFileRepository {
    db_manager: DatabaseManager,
}

impl AudioFileRepository {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self { db_manager }
    }

    fn map_row(row: &Row) -> rusqlite::Result<AudioFile> {
        let file_size: i64 = row.get(4)?;

        Ok(AudioFile {
            id: row.get(0)?,
            user_id: row.get(1)?,
            filename: row.get(2)?,
            file_path: row.get(3)?,
            file_size: file_size as u64,
            duration: row.get(5)?,
            format: row.get(6)?,
            created_at: map_timestamp(row, 7, "created_at")?,
        })
    }
}

#[async_trait]
impl AudioFileStore for AudioFileRepository {
    async fn save(&self, file: AudioFile) -> Result<AudioFile> {
        self.db_manager.with_transaction(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO audio_files (id, user_id, filename, file_path, file_size, duration, format, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    file.id,
                    file.user_id,
                    file.filename,
                    file.file_path,
                    file.file_size as i64,
                    file.duration,
                    file.format,
                    file.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;
        Ok(file)
    }

    async fn get(&self, file_id: &str) -> Result<Option<AudioFile>> {
        self.db_manager.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM audio_files WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![file_id], Self::map_row)?;

            if let Some(result) = rows.next() {
                Ok(Some(result?))
            } else {
                Ok(None)
            }
        })
    }

    async fn delete(&self, file_id: &str) -> Result<bool> {
        let deleted = self.db_manager.with_transaction(|conn| {
            conn.execute("DELETE FROM audio_files WHERE id = ?1", params![file_id])
        })?;
        Ok(deleted > 0)
    }
}
