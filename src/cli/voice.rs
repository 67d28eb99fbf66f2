use anyhow::{Context, Result};

use super::AppContext;
use crate::error::VoiceprintError;
use crate::services::{CreateVoiceRequest, UpdateVoiceRequest};
use crate::storage::VoiceQuery;

pub async fn handle_create_command(
    file: String,
    model: String,
    user: String,
    name: Option<String>,
    text: Option<String>,
    sample_text: Option<String>,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let voice = ctx
        .voices
        .create_voice(CreateVoiceRequest {
            user_id: user,
            file_id: file,
            model,
            name,
            text,
            sample_text,
        })
        .await?;

    println!("✓ Voice ready");
    println!("  Voice id: {}", voice.id);
    println!("  Provider voice id: {}", voice.provider_voice_id);
    println!("  Embedding hash: {}", voice.embedding_hash);
    println!("  Model: {}", voice.model);

    Ok(())
}

pub async fn handle_list_command(
    page: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
    user: Option<String>,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let query = VoiceQuery {
        page,
        limit,
        search,
        user_id: user,
    };
    let result = ctx.voices.list_voices(&query).await?;

    println!("Voices (page {}):", query.page());
    println!("Total: {}", result.total);
    println!();

    for voice in result.voices {
        println!("Voice: {}", voice.id);
        println!(
            "  Name: {}",
            voice.name.unwrap_or_else(|| "None".to_string())
        );
        println!("  User: {}", voice.user_id);
        println!("  File id: {}", voice.file_id);
        println!("  Model: {}", voice.model);
        println!("  Embedding hash: {}", voice.embedding_hash);
        println!("  Created: {}", voice.created_at);
        println!();
    }

    Ok(())
}

pub async fn handle_show_command(voice_id: String) -> Result<()> {
    let ctx = AppContext::init()?;

    let voice = ctx
        .voices
        .get_voice(&voice_id)
        .await?
        .ok_or_else(|| VoiceprintError::not_found(format!("voice {voice_id}")))?;

    println!("{}", serde_json::to_string_pretty(&voice)?);
    Ok(())
}

pub async fn handle_update_command(
    voice_id: String,
    name: Option<String>,
    text: Option<String>,
    metadata: Option<String>,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let metadata = metadata
        .map(|raw| serde_json::from_str(&raw).with_context(|| "Metadata must be a JSON object"))
        .transpose()?;

    let voice = ctx
        .voices
        .update_voice(
            &voice_id,
            UpdateVoiceRequest {
                name,
                text,
                metadata,
            },
        )
        .await?;

    println!("✓ Voice updated: {}", voice.id);
    Ok(())
}

pub async fn handle_rm_command(voice_id: String) -> Result<()> {
    let ctx = AppContext::init()?;

    if ctx.voices.delete_voice(&voice_id).await? {
        println!("✓ Voice deleted: {voice_id}");
    } else {
        println!("Voice not found: {voice_id}");
    }
    Ok(())
}
