use anyhow::Result;

use super::AppContext;

pub async fn handle_history_command(user: String, limit: Option<usize>) -> Result<()> {
    let ctx = AppContext::init()?;

    let history = ctx.tts.history(&user, limit).await?;

    if history.is_empty() {
        println!("No synthesis requests recorded for user: {user}");
        return Ok(());
    }

    println!("Synthesis history for {user}:");
    println!();

    for request in history {
        println!("Request #{}", request.id);
        println!("  Voice id: {}", request.voice_id);
        println!("  Model: {}", request.model);
        println!("  Input: {}", request.input_text);
        println!("  Audio: {}", request.audio_path);
        println!("  Created: {}", request.created_at);
        println!();
    }

    Ok(())
}
