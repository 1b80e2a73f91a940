//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::{Badge, BadgeVariant, LoaderIcon, SparklesIcon};

/// DOM id of the header's message counter.
const MESSAGE_COUNT_ID: &str = "message-count";

/// Chat header with title, message count and request indicator.
#[component]
pub fn ChatHeader(
    /// Title displayed in the header.
    title: String,
    /// Number of messages already in the conversation.
    #[prop(default = 0)]
    message_count: usize,
) -> impl IntoView {
    view! {
        <header class="flex items-center justify-between px-4 py-3 border-b border-gray-200 dark:border-gray-700">
            <div class="flex items-center gap-2">
                <SparklesIcon class="h-5 w-5 text-blue-500" />
                <h2 class="font-semibold text-lg">{title}</h2>
            </div>

            <div class="flex items-center gap-2">
                <span id="chat-indicator" class="htmx-indicator">
                    <LoaderIcon class="text-gray-400" />
                </span>
                <Badge variant=BadgeVariant::Secondary>
                    <MessageCount count=message_count />
                </Badge>
            </div>
        </header>
    }
}

/// Message counter text.
///
/// With `oob` set it renders as an HTMX out-of-band swap, so fragment
/// responses that append cards can refresh the header count too.
#[component]
pub fn MessageCount(
    count: usize,
    #[prop(default = false)]
    oob: bool,
) -> impl IntoView {
    let text = match count {
        1 => "1 message".to_string(),
        n => format!("{n} messages"),
    };
    let swap_oob = oob.then_some("true");

    view! {
        <span id=MESSAGE_COUNT_ID data-role="message-count" hx-swap-oob=swap_oob>
            {text}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render_fragment;

    #[test]
    fn test_count_text_and_oob_flag() {
        let html = render_fragment(|| view! { <MessageCount count=1 /> });
        assert!(html.contains("1 message<"));
        assert!(html.contains("id=\"message-count\""));
        assert!(!html.contains("hx-swap-oob"));

        let html = render_fragment(|| view! { <MessageCount count=3 oob=true /> });
        assert!(html.contains("3 messages"));
        assert!(html.contains("hx-swap-oob=\"true\""));
    }
}
