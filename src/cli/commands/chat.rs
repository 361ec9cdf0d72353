use anyhow::Result;
use client::RequestExecutor;
use client::api::chatbot::Conversation;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{trace, warn};

use crate::cli::reporting;

/// One-shot question when `message` is given, otherwise a stdin session
pub async fn chat(api: &RequestExecutor, message: Vec<String>) -> Result<()> {
    trace!("Entering chat command");
    let mut conversation = Conversation::new();

    if !message.is_empty() {
        let reply = ask(api, &mut conversation, &message.join(" ")).await?;
        println!("{}", reply);
        return Ok(());
    }

    println!("Ask the DSA tutor anything (Ctrl-D to quit).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match ask(api, &mut conversation, line).await {
            Ok(reply) => println!("tutor> {}", reply),
            Err(e) if api.session().is_authenticated() => {
                warn!("Chat turn failed: {}", e);
                println!("tutor> (no answer: {})", e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn ask(api: &RequestExecutor, conversation: &mut Conversation, text: &str) -> Result<String> {
    let loading = reporting::loading();
    let reply = loading
        .with_loading(move || conversation.ask(api, text), Some("Thinking..."))
        .await?;
    Ok(reply)
}
