//! Chat shell layout component.

use leptos::prelude::*;

use super::{ChatHeader, ChatInput, ChatMessageList};
use crate::chat::Message;
use crate::ui::routes::ChatRoutes;

/// Complete chat interface: header, message list, input bar.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <ChatShell
///         title="Assistant".to_string()
///         routes=ChatRoutes::new("abc123")
///         messages=conversation.messages()
///     />
/// }
/// ```
#[component]
pub fn ChatShell(
    /// Title displayed in the header.
    title: String,
    /// Routes for the conversation being shown.
    routes: ChatRoutes,
    /// Messages rendered on first load.
    messages: Vec<Message>,
    /// Voice input endpoint, if any.
    #[prop(default = None)]
    voice_input_url: Option<String>,
) -> impl IntoView {
    let message_count = messages.len();
    let conversation_id = routes.conversation_id().to_string();
    let list_routes = routes.clone();

    view! {
        <div
            class="chat-shell flex flex-col h-[calc(100vh-6rem)] bg-gray-50 dark:bg-gray-900 border border-gray-200 dark:border-gray-700 rounded-2xl overflow-hidden"
            data-conversation=conversation_id
            hx-indicator="#chat-indicator"
        >
            <ChatHeader title=title message_count=message_count />

            <ChatMessageList messages=messages routes=list_routes />

            <ChatInput routes=routes voice_input_url=voice_input_url />
        </div>
    }
}
