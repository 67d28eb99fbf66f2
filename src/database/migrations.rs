use rusqlite::{Connection, Result};
use std::collections::HashMap;
use tracing::info;

use super::schema::{create_schema, SCHEMA_VERSION};

pub struct Migration {
    pub version: u32,
    pub description: String,
    pub up: fn(&Connection) -> Result<()>,
    pub down: fn(&Connection) -> Result<()>,
}

pub struct MigrationManager {
    migrations: HashMap<u32, Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self {
            migrations: HashMap::new(),
        };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(Migration {
            version: 1,
            description: "Initial schema creation".to_string(),
            up: |conn| {
                create_schema(conn)?;
                Ok(())
            },
            down: |conn| {
                super::schema::drop_schema(conn)?;
                Ok(())
            },
        });
    }

    fn add_migration(&mut self, migration: Migration) {
        self.migrations.insert(migration.version, migration);
    }

    pub fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let table_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_versions'",
            [],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_versions",
            [],
            |row| row.get(0),
        )
    }

    pub fn migrate_to_latest(&self, conn: &Connection) -> Result<()> {
        let current = self.get_current_version(conn)?;

        if current >= SCHEMA_VERSION {
            return Ok(());
        }

        for version in (current + 1)..=SCHEMA_VERSION {
            let migration = self
                .migrations
                .get(&version)
                .unwrap_or_else(|| panic!("No migration registered for version {version}"));

            info!(
                version = migration.version,
                description = %migration.description,
                "Applying migration"
            );

            (migration.up)(conn)?;
            conn.execute(
                "INSERT OR IGNORE INTO schema_versions (version) VALUES (?1)",
                [version],
            )?;
        }

        Ok(())
    }

    /// Check that the tables the repositories rely on are present.
    pub fn validate_database(&self, conn: &Connection) -> Result<bool> {
        let required = ["audio_files", "embeddings", "voices", "tts_requests"];

        for table in required {
            let exists: bool = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get::<_, i64>(0).map(|count| count > 0),
            )?;
            if !exists {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}
