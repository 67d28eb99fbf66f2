use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle_init_command() -> Result<()> {
    println!("Initializing Voiceprint database...");

    let config = AppConfig::from_env()?;
    let db_path = &config.database_path;

    if db_path.exists() {
        println!("✓ Database already exists at: {}", db_path.display());
        return Ok(());
    }

    let _db_manager =
        DatabaseManager::new(db_path).with_context(|| "Failed to create database manager")?;

    println!("✓ Database initialized at: {}", db_path.display());
    println!("  Embedding dimension: {}", config.embedding_dimension);
    println!();
    println!("Next steps:");
    println!("  1. Register a voice sample:");
    println!("     voiceprint file add <path>");
    println!();
    println!("  2. Create a voice profile from it:");
    println!("     voiceprint voice create --file <file-id>");
    println!();
    println!("  3. Inspect the stored embedding:");
    println!("     voiceprint embed show <file-id>");

    Ok(())
}
