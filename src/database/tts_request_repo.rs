use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::database::connection::DatabaseManager;
use crate::database::map_timestamp;
use crate::error::Result;
use crate::models::{NewTtsRequest, TtsRequest};
use crate::storage::TtsUsageStore;

const COLUMNS: &str = "id, user_id, voice_id, input_text, model, audio_path, duration, created_at";

pub struct TtsRequestRepository {
    db_manager: DatabaseManager,
}

impl TtsRequestRepository {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self { db_manager }
    }

    fn map_row(row: &Row) -> rusqlite::Result<TtsRequest> {
        Ok(TtsRequest {
            id: row.get(0)?,
            user_id: row.get(1)?,
            voice_id: row.get(2)?,
            input_text: row.get(3)?,
            model: row.get(4)?,
            audio_path: row.get(5)?,
            duration: row.get(6)?,
            created_at: map_timestamp(row, 7, "created_at")?,
        })
    }
}

#[async_trait]
impl TtsUsageStore for TtsRequestRepository {
    async fn append(&self, record: NewTtsRequest) -> Result<TtsRequest> {
        let id = self.db_manager.with_transaction(|conn| {
            conn.execute(
                "INSERT INTO tts_requests (user_id, voice_id, input_text, model, audio_path, duration, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.user_id,
                    record.voice_id,
                    record.input_text,
                    record.model,
                    record.audio_path,
                    record.duration,
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        Ok(record.into_request(id))
    }

    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<TtsRequest>> {
        self.db_manager.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM tts_requests WHERE user_id = ?1 \
                 ORDER BY created_at DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit as i64], Self::map_row)?;

            let mut requests = Vec::new();
            for row in rows {
                requests.push(row?);
            }

            Ok(requests)
        })
    }
}
