//! The `axelari chat` command.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use axelari_assistant::{create_provider, Conversation};

use super::{ConsoleNotifier, Paths, Workspace};

pub async fn execute(paths: &Paths) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let provider = create_provider(&workspace.config.assistant)?;
    let mut conversation = Conversation::from_config(&workspace.config.assistant);

    if let Some(greeting) = conversation.last_reply() {
        println!("{}", greeting.content);
    }
    println!("(type `exit` to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        if let Some(reply) = conversation
            .send(&*provider, &ConsoleNotifier, &line)
            .await
        {
            println!("\n{}\n", reply.content);
        }
    }

    tracing::debug!(messages = conversation.messages().len(), "chat ended");
    Ok(())
}
