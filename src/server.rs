use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State, multipart::MultipartError},
    http::{HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use leptos::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::chat::{
    AttachmentRef, ChatInputState, Conversation, ConversationStore, Message, MessageView,
    ReferenceAction, UploadedFile, UsageType,
};
use crate::config::{AppConfig, ConversationsConfig};
use crate::ui::chat::{ChatMessageCard, MessageCount};
use crate::ui::page::render_chat_page;
use crate::ui::routes::REFERENCE_OPEN_PATH;
use crate::ui::{ChatRoutes, render_fragment};

const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "api.config.loaded",
        base_url = %config.api.base_url,
        query_path = %config.api.query_path,
        attachments = %config.attachments_base_url(),
        "Backend configuration loaded"
    );

    let state = AppState::from_config(Arc::clone(&config))?;
    let _cleanup = spawn_conversation_cleanup(state.conversations.clone(), &config.conversations);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/chat/{conversation}/send", post(send_handler))
        .route("/api/chat/{conversation}/drop", post(drop_handler))
        .route("/api/chat/{conversation}/messages", get(list_messages_handler))
        .route(
            "/api/chat/{conversation}/messages/{message}",
            get(message_card_handler),
        )
        .route(
            "/api/chat/{conversation}/messages/{message}/attachment",
            post(attachment_handler),
        )
        .route(REFERENCE_OPEN_PATH, post(reference_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop conversations that have been idle past the TTL.
pub fn spawn_conversation_cleanup(
    store: ConversationStore,
    config: &ConversationsConfig,
) -> JoinHandle<()> {
    let ttl = config.ttl();
    let mut ticker = tokio::time::interval(config.cleanup_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            let removed = store.cleanup_expired_with_timeout(ttl);
            if removed > 0 {
                info!(
                    name: "conversations.expired",
                    removed = removed,
                    remaining = store.len(),
                    "Expired idle conversations"
                );
            }
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Request-level failures surfaced as HTTP statuses.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("message not found: {0}")]
    MessageNotFound(String),

    #[error("invalid form data: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ConversationNotFound(_) | Self::MessageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Multipart(e) => e.status(),
        };
        tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        (status, self.to_string()).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering helpers
// ─────────────────────────────────────────────────────────────────────────────

fn render_cards(messages: Vec<Message>, routes: &ChatRoutes) -> String {
    let routes = routes.clone();
    render_fragment(move || {
        messages
            .into_iter()
            .map(|message| {
                view! { <ChatMessageCard card={MessageView::new(message)} routes={routes.clone()} /> }
            })
            .collect_view()
    })
}

fn existing(state: &AppState, id: &str) -> Result<Conversation, ServerError> {
    state
        .conversations
        .get(id)
        .ok_or_else(|| ServerError::ConversationNotFound(id.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IndexQuery {
    /// Continue an existing conversation.
    #[serde(default)]
    c: Option<String>,
}

/// GET / - Chat page, continuing `?c=<id>` or starting a new conversation.
async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let conversation = match query.c.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => state.conversations.get_or_create(id),
        None => state.conversations.create(),
    };

    Html(render_chat_page(
        &state.config.ui.title,
        ChatRoutes::new(conversation.id()),
        conversation.messages(),
        state.config.ui.voice_input_url.clone(),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Input
// ─────────────────────────────────────────────────────────────────────────────

/// Multipart body posted by the input form.
#[derive(Debug, Default)]
struct InputForm {
    message: String,
    files: Vec<UploadedFile>,
}

async fn read_input_form(mut multipart: Multipart) -> Result<InputForm, ServerError> {
    let mut form = InputForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("message") => form.message = field.text().await?,
            Some("files") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when nothing was picked.
                if name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile::new(name, content_type, bytes));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Which input gesture produced the form.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    Submit,
    Drop,
}

async fn handle_input(
    state: &AppState,
    conversation_id: &str,
    multipart: Multipart,
    gesture: Gesture,
) -> Result<Html<String>, ServerError> {
    let conversation = existing(state, conversation_id)?;
    let form = read_input_form(multipart).await?;

    let mut input = ChatInputState::new();
    input.set_text(form.message);

    let mut emitted = None;
    let mut on_send = |text: String, files: Option<Vec<UploadedFile>>| {
        emitted = Some((text, files));
    };

    match gesture {
        Gesture::Submit => {
            input.select_files(form.files);
            input.submit(&mut on_send);
        }
        Gesture::Drop => {
            input.drop_files(form.files, &mut on_send);
        }
    }

    let Some((text, files)) = emitted else {
        return Ok(Html(String::new()));
    };

    let added = state.chat.send(&conversation, text, files).await;
    let count = conversation.len();
    let mut html = render_cards(added, &ChatRoutes::new(conversation.id()));
    html.push_str(&render_fragment(move || {
        view! { <MessageCount count=count oob=true /> }
    }));
    Ok(Html(html))
}

/// POST /api/chat/{conversation}/send - Form submit.
async fn send_handler(
    State(state): State<AppState>,
    Path(conversation): Path<String>,
    multipart: Multipart,
) -> Result<Html<String>, ServerError> {
    handle_input(&state, &conversation, multipart, Gesture::Submit).await
}

/// POST /api/chat/{conversation}/drop - Files dropped on the input.
async fn drop_handler(
    State(state): State<AppState>,
    Path(conversation): Path<String>,
    multipart: Multipart,
) -> Result<Html<String>, ServerError> {
    handle_input(&state, &conversation, multipart, Gesture::Drop).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/chat/{conversation}/messages - All cards.
async fn list_messages_handler(
    State(state): State<AppState>,
    Path(conversation): Path<String>,
) -> Result<Html<String>, ServerError> {
    let conversation = existing(&state, &conversation)?;
    Ok(Html(render_cards(
        conversation.messages(),
        &ChatRoutes::new(conversation.id()),
    )))
}

#[derive(Debug, Deserialize)]
struct CardQuery {
    #[serde(default)]
    expanded: bool,
}

/// GET /api/chat/{conversation}/messages/{message}?expanded= - One card.
async fn message_card_handler(
    State(state): State<AppState>,
    Path((conversation, message)): Path<(String, String)>,
    Query(query): Query<CardQuery>,
) -> Result<Html<String>, ServerError> {
    let conversation = existing(&state, &conversation)?;
    let message = conversation
        .get(&message)
        .ok_or(ServerError::MessageNotFound(message))?;

    let routes = ChatRoutes::new(conversation.id());
    let card = MessageView::with_expanded(message, query.expanded);
    Ok(Html(render_fragment(move || {
        view! { <ChatMessageCard card=card routes=routes /> }
    })))
}

#[derive(Debug, Deserialize)]
struct AttachmentQuery {
    usage: UsageType,
}

/// POST /api/chat/{conversation}/messages/{message}/attachment?usage= - Save.
///
/// Always `204`: upload failures are logged by the uploader only.
async fn attachment_handler(
    State(state): State<AppState>,
    Path((conversation, message)): Path<(String, String)>,
    Query(query): Query<AttachmentQuery>,
) -> Result<StatusCode, ServerError> {
    let conversation = existing(&state, &conversation)?;
    let message = conversation
        .get(&message)
        .ok_or(ServerError::MessageNotFound(message))?;

    let _ = state.uploader.save(&message, query.usage).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/references/open - Reference or image clicked.
async fn reference_handler(
    State(state): State<AppState>,
    Form(reference): Form<AttachmentRef>,
) -> Response {
    match state.references.open(&reference) {
        ReferenceAction::Redirect(location) => {
            (StatusCode::NO_CONTENT, [(HX_REDIRECT, location)]).into_response()
        }
        ReferenceAction::Handled => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cleanup_task_evicts_idle_conversations() {
        let store = ConversationStore::new();
        let _ = store.create_with_id("idle");
        tokio::time::sleep(Duration::from_millis(5)).await;

        let config = ConversationsConfig {
            ttl_secs: 0,
            cleanup_interval_secs: 3600,
        };
        let handle = spawn_conversation_cleanup(store.clone(), &config);

        // The first tick fires immediately.
        for _ in 0..50 {
            if store.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(store.is_empty());
    }
}
