use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Ask the tutor bot a question, sending prior turns as context
pub async fn send_message(api: &RequestExecutor, message: &str, history: &[ChatMessage]) -> Result<ChatReply> {
    log::debug!("Sending chatbot message ({} prior turns)", history.len());
    let result: Result<ChatReply> = api.post("/api/chatbot/message", &ChatRequest { message, history }).await;
    match &result {
        Ok(reply) => log::info!("Chatbot replied with {} characters", reply.reply.len()),
        Err(e) => log::error!("Chatbot request failed: {}", e),
    }
    result
}

/// Running chat transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text` with the transcript so far, then record both turns.
    ///
    /// On failure the transcript is left unchanged.
    pub async fn ask(&mut self, api: &RequestExecutor, text: &str) -> Result<String> {
        let reply = send_message(api, text, &self.messages).await?;
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply.reply.clone(),
        });
        Ok(reply.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;

    #[tokio::test]
    async fn test_conversation_carries_history() {
        let h = harness();
        h.transport.respond(200, r#"{"reply":"A stack is LIFO."}"#);
        h.transport.respond(500, r#"{"message":"Model overloaded"}"#);
        h.transport.respond(200, r#"{"reply":"A queue is FIFO."}"#);

        let mut conversation = Conversation::new();
        assert_eq!(conversation.ask(&h.executor, "What is a stack?").await.unwrap(), "A stack is LIFO.");
        assert_eq!(
            h.transport.last_request().body.as_deref(),
            Some(r#"{"message":"What is a stack?","history":[]}"#)
        );

        let err = conversation.ask(&h.executor, "And a queue?").await.unwrap_err();
        assert_eq!(err.user_message(), "Model overloaded");
        assert_eq!(conversation.messages().len(), 2);

        conversation.ask(&h.executor, "And a queue?").await.unwrap();
        assert_eq!(
            h.transport.last_request().body.as_deref(),
            Some(r#"{"message":"And a queue?","history":[{"role":"user","content":"What is a stack?"},{"role":"assistant","content":"A stack is LIFO."}]}"#)
        );
        assert_eq!(conversation.messages().len(), 4);
    }
}
