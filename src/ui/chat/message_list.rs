//! Chat message list component.

use leptos::prelude::*;

use super::ChatMessageCard;
use crate::chat::{Message, MessageView};
use crate::ui::routes::ChatRoutes;

/// Scrollable container of message cards.
///
/// New cards returned by the send and drop routes are appended to
/// `#message-list` by the input form.
#[component]
pub fn ChatMessageList(messages: Vec<Message>, routes: ChatRoutes) -> impl IntoView {
    let cards = messages
        .into_iter()
        .map(|message| {
            view! { <ChatMessageCard card={MessageView::new(message)} routes={routes.clone()} /> }
        })
        .collect_view();

    view! {
        <div
            id="message-list"
            class="flex-1 overflow-y-auto px-4 py-6 pl-16"
            aria-live="polite"
            aria-label="Chat messages"
        >
            {cards}
        </div>
    }
}
