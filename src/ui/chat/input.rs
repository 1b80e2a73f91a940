//! Chat input bar: text field, file picker, optional voice button.

use leptos::prelude::*;

use crate::ui::components::{
    Button, ButtonSize, ButtonVariant, MicIcon, PaperclipIcon, SendIcon, button_classes,
};
use crate::ui::routes::ChatRoutes;

/// Posts the dropped files with the typed text to the drop route and
/// appends the returned cards. Only the text field is cleared; the picker's
/// pending selection is left untouched.
const DROP_SCRIPT: &str = "event.preventDefault(); \
    const dropped = event.dataTransfer.files; \
    if (!dropped.length) return; \
    const text = this.elements.message; \
    const body = new FormData(); \
    body.append('message', text.value); \
    for (const file of dropped) body.append('files', file); \
    fetch(this.dataset.dropUrl, {method: 'POST', body}) \
        .then((r) => r.ok ? r.text() : Promise.reject(r.status)) \
        .then((html) => { htmx.swap('#message-list', html, {swapStyle: 'beforeend'}); text.value = ''; });";

const PICK_FILES: &str = "this.form.querySelector('input[type=file]').click()";

/// Chat input form.
///
/// Submits text plus any picked files as multipart to the send route and
/// appends the returned cards to the message list. While `loading` is set
/// the text field and send button are disabled; HTMX also disables the send
/// button for the duration of each request.
#[component]
pub fn ChatInput(
    /// Routes for the conversation this input belongs to.
    routes: ChatRoutes,
    /// Disables the submit affordance.
    #[prop(default = false)]
    loading: bool,
    /// Voice input endpoint; the mic button is hidden when `None`.
    #[prop(default = None)]
    voice_input_url: Option<String>,
) -> impl IntoView {
    let voice = voice_input_url.map(|url| {
        let classes = button_classes(ButtonVariant::Ghost, ButtonSize::Icon, "");
        view! {
            <button
                type="button"
                class=classes
                title="Voice input"
                data-role="voice"
                hx-post=url
                hx-swap="none"
            >
                <MicIcon class="w-5 h-5" />
            </button>
        }
    });

    view! {
        <form
            id="chat-input"
            class="border-t border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 p-4 transition-colors duration-200"
            hx-post={routes.send_url()}
            hx-encoding="multipart/form-data"
            hx-target="#message-list"
            hx-swap="beforeend"
            hx-disabled-elt="find button[type='submit']"
            hx-on--after-request="if (event.detail.successful) this.reset()"
            data-drop-url={routes.drop_url()}
            ondragover="event.preventDefault()"
            ondrop=DROP_SCRIPT
        >
            <div class="flex items-center space-x-4">
                <input type="file" name="files" class="hidden" multiple=true />

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    label="Attach files"
                    onclick=PICK_FILES
                >
                    <PaperclipIcon class="w-5 h-5" />
                </Button>

                <input
                    type="text"
                    name="message"
                    placeholder="Type your message..."
                    autocomplete="off"
                    class="flex-1 rounded-lg border border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-gray-900 dark:text-gray-100 px-4 py-2 focus:border-blue-500 dark:focus:border-blue-400 focus:outline-none transition-colors duration-200"
                    disabled=loading
                />

                {voice}

                <Button
                    variant=ButtonVariant::Primary
                    button_type="submit"
                    label="Send"
                    disabled=loading
                >
                    <SendIcon class="w-5 h-5" />
                </Button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render_fragment;

    /// Count `disabled` attributes, skipping class names and `hx-disabled-elt`.
    fn disabled_attrs(html: &str) -> usize {
        html.match_indices("disabled")
            .filter(|(i, m)| {
                let before = html[..*i].chars().next_back();
                let after = html[i + m.len()..].chars().next();
                before == Some(' ') && !matches!(after, Some(':' | '-'))
            })
            .count()
    }

    #[test]
    fn test_input_posts_to_conversation_routes() {
        let html = render_fragment(|| view! { <ChatInput routes={ChatRoutes::new("abc")} /> });

        assert!(html.contains("hx-post=\"/api/chat/abc/send\""));
        assert!(html.contains("data-drop-url=\"/api/chat/abc/drop\""));
        assert!(html.contains("name=\"files\""));
        assert!(html.contains("name=\"message\""));
        assert!(!html.contains("data-role=\"voice\""));
        assert_eq!(disabled_attrs(&html), 0);
    }

    #[test]
    fn test_drop_keeps_pending_selection() {
        assert!(!DROP_SCRIPT.contains("reset()"));
        assert!(!DROP_SCRIPT.contains(".files ="));
        assert!(DROP_SCRIPT.contains("text.value = ''"));

        let html = render_fragment(|| view! { <ChatInput routes={ChatRoutes::new("abc")} /> });
        assert!(html.contains("ondrop="));
        assert!(html.contains("fetch(this.dataset.dropUrl"));
    }

    #[test]
    fn test_loading_disables_controls() {
        let html = render_fragment(
            || view! { <ChatInput routes={ChatRoutes::new("abc")} loading=true /> },
        );
        assert_eq!(disabled_attrs(&html), 2);
    }

    #[test]
    fn test_voice_button_only_when_configured() {
        let html = render_fragment(|| {
            view! {
                <ChatInput
                    routes={ChatRoutes::new("abc")}
                    voice_input_url={Some("/voice".to_string())}
                />
            }
        });
        assert!(html.contains("data-role=\"voice\""));
        assert!(html.contains("hx-post=\"/voice\""));
    }
}
