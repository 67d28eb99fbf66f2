use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::database::connection::DatabaseManager;
use crate::database::map_timestamp;
use crate::error::Result;
use crate::models::Embedding;
use crate::storage::EmbeddingStore;

const COLUMNS: &str = "id, file_id, vector, vector_hash, dimension, model_version, created_at";

pub struct EmbeddingRepository {
    db_manager: DatabaseManager,
}

impl EmbeddingRepository {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self { db_manager }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Embedding> {
        let vector_json: String = row.get(2)?;
        let vector: Vec<f64> = serde_json::from_str(&vector_json).map_err(|_| {
            rusqlite::Error::InvalidColumnType(2, "vector".to_string(), rusqlite::types::Type::Text)
        })?;
        let dimension: i64 = row.get(4)?;

        Ok(Embedding {
            id: row.get(0)?,
            file_id: row.get(1)?,
            vector,
            vector_hash: row.get(3)?,
            dimension: dimension as usize,
            model_version: row.get(5)?,
            created_at: map_timestamp(row, 6, "created_at")?,
        })
    }
}

#[async_trait]
impl EmbeddingStore for EmbeddingRepository {
    async fn save(&self, embedding: Embedding) -> Result<Embedding> {
        let vector_json = serde_json::to_string(&embedding.vector)?;

        // The conditional insert and the read-back run in one transaction on
        // the shared connection; a concurrent save for the same file id
        // observes the winner through the conflict clause.
        self.db_manager.with_transaction(|conn| {
            conn.execute(
                "INSERT INTO embeddings (id, file_id, vector, vector_hash, dimension, model_version, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(file_id) DO NOTHING",
                params![
                    embedding.id,
                    embedding.file_id,
                    vector_json,
                    embedding.vector_hash,
                    embedding.dimension as i64,
                    embedding.model_version,
                    embedding.created_at.to_rfc3339(),
                ],
            )?;

            conn.query_row(
                &format!("SELECT {COLUMNS} FROM embeddings WHERE file_id = ?1"),
                params![embedding.file_id],
                Self::map_row,
            )
        })
    }

    async fn get(&self, file_id: &str) -> Result<Option<Embedding>> {
        self.db_manager.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM embeddings WHERE file_id = ?1"))?;
            let mut rows = stmt.query_map(params![file_id], Self::map_row)?;

            if let Some(result) = rows.next() {
                Ok(Some(result?))
            } else {
                Ok(None)
            }
        })
    }
}
