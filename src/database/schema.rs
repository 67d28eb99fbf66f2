use rusqlite::{Connection, Result};

pub const SCHEMA_VERSION: u32 = 1;

pub fn create_schema(conn: &Connection) -> Result<()> {
    // Schema version bookkeeping
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_versions (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    // Uploaded voice samples (metadata only; audio lives on disk)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS audio_files (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            filename TEXT NOT NULL,
            file_path TEXT NOT NULL,
            file_size INTEGER NOT NULL DEFAULT 0,
            duration REAL NOT NULL DEFAULT 0,
            format TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    // One embedding per source file; vector stored as a JSON array
    conn.execute(
        "CREATE TABLE IF NOT EXISTS embeddings (
            id TEXT PRIMARY KEY,
            file_id TEXT NOT NULL UNIQUE,
            vector TEXT NOT NULL,
            vector_hash TEXT NOT NULL,
            dimension INTEGER NOT NULL CHECK (dimension > 0),
            model_version TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    // Voice profiles; one per (source file, model)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS voices (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT,
            provider_voice_id TEXT NOT NULL,
            file_id TEXT NOT NULL,
            model TEXT NOT NULL,
            text TEXT,
            sample_text TEXT,
            sample_audio_path TEXT,
            embedding_hash TEXT NOT NULL,
            metadata TEXT, -- JSON object
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'utc')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now', 'utc')),
            UNIQUE(file_id, model)
        )",
        [],
    )?;

    // Synthesis usage ledger
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tts_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            voice_id TEXT NOT NULL,
            input_text TEXT NOT NULL,
            model TEXT NOT NULL,
            audio_path TEXT NOT NULL,
            duration REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    create_indexes(conn)?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_audio_files_user ON audio_files(user_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_voices_user ON voices(user_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_voices_created_at ON voices(created_at)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tts_requests_user ON tts_requests(user_id, created_at)",
        [],
    )?;
    Ok(())
}

pub fn drop_schema(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS tts_requests", [])?;
    conn.execute("DROP TABLE IF EXISTS voices", [])?;
    conn.execute("DROP TABLE IF EXISTS embeddings", [])?;
    conn.execute("DROP TABLE IF EXISTS audio_files", [])?;
    conn.execute("DROP TABLE IF EXISTS schema_versions", [])?;
    Ok(())
}
