use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use super::migrations::MigrationManager;
use crate::error::{Result, VoiceprintError};

/// Owns the SQLite connection and serializes access to it.
///
/// The connection mutex is what makes repository check-then-insert
/// sequences atomic; every repository shares one manager.
#[derive(Debug)]
pub struct DatabaseManager {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseManager {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        connection.execute("PRAGMA foreign_keys = ON", [])?;
        // Some PRAGMA statements return values, so we need to consume them
        connection
            .prepare("PRAGMA journal_mode = WAL")?
            .query_map([], |_| Ok(()))?
            .for_each(drop);
        connection
            .prepare("PRAGMA synchronous = NORMAL")?
            .query_map([], |_| Ok(()))?
            .for_each(drop);

        let manager = Self {
            db_path,
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;

        info!("Database initialized at: {}", manager.db_path.display());
        Ok(manager)
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute("PRAGMA foreign_keys = ON", [])?;

        let manager = Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;

        debug!("In-memory database initialized");
        Ok(manager)
    }

    fn run_migrations(&self) -> Result<()> {
        let migration_manager = MigrationManager::new();
        let conn = self.connection.lock().unwrap();

        migration_manager.migrate_to_latest(&conn)?;

        if !migration_manager.validate_database(&conn)? {
            return Err(VoiceprintError::service(
                "Database validation failed after migration",
            ));
        }

        Ok(())
    }

    pub fn with_connection<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R>,
    {
        let conn = self.connection.lock().unwrap();
        f(&conn).map_err(VoiceprintError::from)
    }

    pub fn with_transaction<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R>,
    {
        let conn = self.connection.lock().unwrap();
        let tx = conn.unchecked_transaction()?;

        match f(&conn) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!("Failed to rollback transaction: {rollback_err}");
                }
                Err(e.into())
            }
        }
    }

    pub fn check_integrity(&self) -> Result<bool> {
        self.with_connection(|conn| {
            let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            Ok(result == "ok")
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Clone for DatabaseManager {
    fn clone(&self) -> Self {
        Self {
            db_path: self.db_path.clone(),
            connection: Arc::clone(&self.connection),
        }
    }
}
