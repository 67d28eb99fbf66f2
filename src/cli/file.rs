use std::path::Path;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use super::AppContext;
use crate::error::VoiceprintError;
use crate::services::RegisterFileRequest;

pub async fn handle_add_command(path: String, user: String, duration: Option<f64>) -> Result<()> {
    let ctx = AppContext::init()?;
    let source = Path::new(&path);

    let filename = source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Invalid file path: {path}"))?;
    let format = source
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    let file_size = std::fs::metadata(source)?.len();

    // Copy the sample into managed storage under a fresh name.
    std::fs::create_dir_all(&ctx.config.storage_dir)?;
    let stored_path = ctx
        .config
        .storage_dir
        .join(format!("{}.{format}", Uuid::new_v4()));
    std::fs::copy(source, &stored_path)?;

    let file = ctx
        .files
        .register(RegisterFileRequest {
            user_id: user,
            filename,
            file_path: stored_path.to_string_lossy().to_string(),
            file_size,
            duration: duration.unwrap_or(0.0),
            format,
        })
        .await?;

    println!("✓ Sample registered");
    println!("  File id: {}", file.id);
    println!("  Stored at: {}", file.file_path);
    println!("  Size: {} bytes", file.file_size);

    Ok(())
}

pub async fn handle_show_command(file_id: String) -> Result<()> {
    let ctx = AppContext::init()?;

    let file = ctx
        .files
        .get(&file_id)
        .await?
        .ok_or_else(|| VoiceprintError::not_found(format!("audio file {file_id}")))?;

    println!("{}", serde_json::to_string_pretty(&file)?);
    Ok(())
}

pub async fn handle_rm_command(file_id: String) -> Result<()> {
    let ctx = AppContext::init()?;

    if ctx.files.delete(&file_id).await? {
        println!("✓ Sample deleted: {file_id}");
    } else {
        println!("Sample not found: {file_id}");
    }
    Ok(())
}
