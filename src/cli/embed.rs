use anyhow::Result;

use super::AppContext;
use crate::error::VoiceprintError;

pub async fn handle_generate_command(file_id: String) -> Result<()> {
    let ctx = AppContext::init()?;

    let embedding = ctx.embeddings.generate_and_save(&file_id).await?;

    println!("✓ Embedding stored");
    println!("  Embedding id: {}", embedding.id);
    println!("  File id: {}", embedding.file_id);
    println!("  Dimension: {}", embedding.dimension);
    println!("  Vector hash: {}", embedding.vector_hash);
    println!("  Model version: {}", embedding.model_version);

    Ok(())
}

pub async fn handle_show_command(file_id: String, full: bool) -> Result<()> {
    let ctx = AppContext::init()?;

    let embedding = ctx
        .embeddings
        .get(&file_id)
        .await?
        .ok_or_else(|| VoiceprintError::not_found(format!("embedding for file {file_id}")))?;

    if full {
        println!("{}", serde_json::to_string_pretty(&embedding)?);
    } else {
        println!("Embedding: {}", embedding.id);
        println!("  File id: {}", embedding.file_id);
        println!("  Dimension: {}", embedding.dimension);
        println!("  Vector hash: {}", embedding.vector_hash);
        println!("  Model version: {}", embedding.model_version);
        println!("  Created: {}", embedding.created_at);
    }

    Ok(())
}
