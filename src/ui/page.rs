//! Full HTML document for the chat page.

use leptos::prelude::*;

use crate::chat::Message;
use crate::ui::chat::ChatShell;
use crate::ui::render_fragment;
use crate::ui::routes::ChatRoutes;

/// Document shell around the chat.
#[component]
fn ChatDocument(
    title: String,
    routes: ChatRoutes,
    messages: Vec<Message>,
    voice_input_url: Option<String>,
) -> impl IntoView {
    let doc_title = title.clone();

    view! {
        <html lang="en" class="dark">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{doc_title}</title>

                // Local scripts only (no CDN)
                <script src="/static/vendor/htmx-2.0.8.min.js"></script>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>

            <body class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 antialiased">
                <main id="app" class="container mx-auto px-4 py-6 max-w-5xl">
                    <ChatShell
                        title=title
                        routes=routes
                        messages=messages
                        voice_input_url=voice_input_url
                    />
                </main>
            </body>
        </html>
    }
}

/// Render the whole chat page for one conversation.
pub fn render_chat_page(
    title: &str,
    routes: ChatRoutes,
    messages: Vec<Message>,
    voice_input_url: Option<String>,
) -> String {
    let title = title.to_string();
    let body = render_fragment(move || {
        view! {
            <ChatDocument
                title=title
                routes=routes
                messages=messages
                voice_input_url=voice_input_url
            />
        }
    });
    format!("<!DOCTYPE html>{body}")
}
