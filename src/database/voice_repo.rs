use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Row};
use uuid::Uuid;

use crate::database::connection::DatabaseManager;
use crate::database::map_timestamp;
use crate::error::Result;
use crate::models::Voice;
use crate::storage::{VoicePage, VoiceQuery, VoiceStore};

const COLUMNS: &str = "id, user_id, name, provider_voice_id, file_id, model, text, sample_text, \
                       sample_audio_path, embedding_hash, metadata, created_at, updated_at";

pub struct VoiceRepository {
    db_manager: DatabaseManager,
}

impl VoiceRepository {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self { db_manager }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Voice> {
        let id_str: String = row.get(0)?;
        let id = Uuid::parse_str(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "id".to_string(), rusqlite::types::Type::Text)
        })?;

        let metadata_json: Option<String> = row.get(10)?;
        let metadata = match metadata_json {
            Some(json) => Some(serde_json::from_str(&json).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    10,
                    "metadata".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?),
            None => None,
        };

        Ok(Voice {
            id,
            user_id: row.get(1)?,
            name: row.get(2)?,
            provider_voice_id: row.get(3)?,
            file_id: row.get(4)?,
            model: row.get(5)?,
            text: row.get(6)?,
            sample_text: row.get(7)?,
            sample_audio_path: row.get(8)?,
            embedding_hash: row.get(9)?,
            metadata,
            created_at: map_timestamp(row, 11, "created_at")?,
            updated_at: map_timestamp(row, 12, "updated_at")?,
        })
    }
}

#[async_trait]
impl VoiceStore for VoiceRepository {
    async fn save(&self, voice: Voice) -> Result<Voice> {
        let metadata_json = voice
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.db_manager.with_transaction(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO voices (id, user_id, name, provider_voice_id, file_id, model, text, \
                 sample_text, sample_audio_path, embedding_hash, metadata, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    voice.id.to_string(),
                    voice.user_id,
                    voice.name,
                    voice.provider_voice_id,
                    voice.file_id,
                    voice.model,
                    voice.text,
                    voice.sample_text,
                    voice.sample_audio_path,
                    voice.embedding_hash,
                    metadata_json,
                    voice.created_at.to_rfc3339(),
                    voice.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;
        Ok(voice)
    }

    async fn get(&self, voice_id: &str) -> Result<Option<Voice>> {
        self.db_manager.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM voices WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![voice_id], Self::map_row)?;

            if let Some(result) = rows.next() {
                Ok(Some(result?))
            } else {
                Ok(None)
            }
        })
    }

    async fn find_by_file_and_model(&self, file_id: &str, model: &str) -> Result<Option<Voice>> {
        self.db_manager.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM voices WHERE file_id = ?1 AND model = ?2"
            ))?;
            let mut rows = stmt.query_map(params![file_id, model], Self::map_row)?;

            if let Some(result) = rows.next() {
                Ok(Some(result?))
            } else {
                Ok(None)
            }
        })
    }

    async fn list(&self, query: &VoiceQuery) -> Result<VoicePage> {
        let mut where_clauses: Vec<&str> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(user_id) = &query.user_id {
            where_clauses.push("user_id = ?");
            args.push(user_id.clone());
        }
        if let Some(search) = &query.search {
            where_clauses.push(
                "(LOWER(id) LIKE ? OR LOWER(provider_voice_id) LIKE ? OR LOWER(COALESCE(name, '')) LIKE ?)",
            );
            let pattern = format!("%{}%", search.to_lowercase());
            args.push(pattern.clone());
            args.push(pattern.clone());
            args.push(pattern);
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };
        let limit = query.limit();
        let offset = query.offset();

        self.db_manager.with_connection(|conn| {
            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM voices{where_sql}"),
                params_from_iter(args.iter()),
                |row| row.get(0),
            )?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM voices{where_sql} \
                 ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
            ))?;
            let rows = stmt.query_map(params_from_iter(args.iter()), Self::map_row)?;

            let mut voices = Vec::new();
            for row in rows {
                voices.push(row?);
            }

            Ok(VoicePage {
                voices,
                total: total as usize,
            })
        })
    }

    async fn delete(&self, voice_id: &str) -> Result<bool> {
        let deleted = self.db_manager.with_transaction(|conn| {
            conn.execute("DELETE FROM voices WHERE id = ?1", params![voice_id])
        })?;
        Ok(deleted > 0)
    }
}
