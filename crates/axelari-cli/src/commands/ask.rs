//! The `axelari ask` command.

use anyhow::Result;

use axelari_assistant::{create_provider, Conversation};

use super::{ConsoleNotifier, Paths, Workspace};

pub async fn execute(paths: &Paths, prompt: String) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let provider = create_provider(&workspace.config.assistant)?;
    let mut conversation = Conversation::from_config(&workspace.config.assistant);

    match conversation.send(&*provider, &ConsoleNotifier, &prompt).await {
        Some(reply) => println!("{}", reply.content),
        None => anyhow::bail!("prompt is empty"),
    }
    Ok(())
}
