//! Turns emitted input into conversation messages.

use crate::api::QueryClient;
use crate::chat::conversation::Conversation;
use crate::chat::input::UploadedFile;
use crate::chat::message::{AttachmentRef, Message};

/// Owns the send path: record the user message, query the backend, record
/// the reply.
#[derive(Debug, Clone)]
pub struct ChatService {
    client: QueryClient,
}

impl ChatService {
    pub fn new(client: QueryClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// Handle one emission from the input box.
    ///
    /// Returns the messages appended to `conversation`, in order. The backend
    /// is only queried when there is text; a files-only send records the user
    /// message alone.
    pub async fn send(
        &self,
        conversation: &Conversation,
        text: String,
        files: Option<Vec<UploadedFile>>,
    ) -> Vec<Message> {
        let files = files.unwrap_or_default();
        let has_text = !text.trim().is_empty();

        tracing::info!(
            name: "chat.send",
            conversation = %conversation.id(),
            chars = text.len(),
            files = files.len(),
            "Received chat input"
        );

        let user = user_message(text.clone(), &files);
        conversation.push(user.clone());
        let mut added = vec![user];

        if !has_text {
            return added;
        }

        // The typed text goes out as-is; trimming only decides emptiness.
        let reply = match self.client.send_message(&text).await {
            Ok(body) => Message::bot_from_response(&body),
            Err(e) => Message::bot(format!("Sorry, something went wrong: {e}")),
        };
        conversation.push(reply.clone());
        added.push(reply);
        added
    }
}

/// Build the user message for an emission.
///
/// Attached files are kept as references; when there is no text the content
/// lists the file names instead.
pub fn user_message(text: String, files: &[UploadedFile]) -> Message {
    let content = if text.trim().is_empty() && !files.is_empty() {
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        format!("Attached: {}", names.join(", "))
    } else {
        text
    };

    let references = files
        .iter()
        .map(|f| AttachmentRef::new(format!("upload://{}", f.name), f.name.clone()))
        .collect();

    Message::user(content).with_references(references)
}
