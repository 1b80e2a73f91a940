use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, routing::post};
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use chat_desk::AppState;
use chat_desk::chat::{AttachmentRef, Message, ReferenceAction, ReferenceHandler};
use chat_desk::config::{
    ApiConfig, AppConfig, AttachmentsConfig, ConversationsConfig, LogConfig, ServerConfig,
    UiConfig,
};
use chat_desk::server::build_router;
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<Value>>>;

/// Fake backend answering both the query and the upload endpoints.
async fn spawn_backend() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route(
            "/query",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body.clone());
                Json(json!({
                    "response": format!("**Answer** to {}", body["query"].as_str().unwrap_or("")),
                    "references": [{"path": "/docs/guide.pdf", "name": "Guide"}]
                }))
            }),
        )
        .route(
            "/api/attachment/upload",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({"status": "success", "attachment_id": "a1"}))
            }),
        )
        .with_state(Arc::clone(&seen));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".into(),
            static_dir: "static".into(),
            body_limit_bytes: 1024 * 1024,
        },
        api: ApiConfig {
            base_url: base_url.into(),
            query_path: "/query".into(),
        },
        attachments: AttachmentsConfig {
            base_url: None,
            upload_path: "/api/attachment/upload".into(),
        },
        ui: UiConfig {
            title: "Test Chat".into(),
            voice_input_url: None,
        },
        conversations: ConversationsConfig {
            ttl_secs: 1800,
            cleanup_interval_secs: 60,
        },
        log: LogConfig { json: false },
    }
}

async fn setup() -> (TestServer, AppState, Seen) {
    let (base, seen) = spawn_backend().await;
    let state = AppState::from_config(Arc::new(test_config(&base))).unwrap();
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state, seen)
}

#[tokio::test]
async fn test_index_renders_page() {
    let (server, state, _) = setup().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"chat-input\""));
    assert_eq!(state.conversations.len(), 1);
}

#[tokio::test]
async fn test_index_continues_conversation() {
    let (server, state, _) = setup().await;
    let conversation = state.conversations.create_with_id("known");
    conversation.push(Message::user("from before"));

    let html = server.get("/").add_query_param("c", "known").await.text();

    assert!(html.contains("from before"));
    assert_eq!(state.conversations.len(), 1);
}

#[tokio::test]
async fn test_send_text_queries_backend_and_returns_cards() {
    let (server, state, seen) = setup().await;
    let conversation = state.conversations.create_with_id("c1");

    let form = MultipartForm::new().add_text("message", "status?");
    let response = server.post("/api/chat/c1/send").multipart(form).await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("status?"));
    assert!(html.contains("<strong>Answer</strong>"));
    assert!(html.contains("Guide"));
    assert_eq!(conversation.len(), 2);
    assert_eq!(seen.lock().unwrap()[0], json!({"query": "status?"}));

    // Header counter refreshed out of band.
    assert!(html.contains("id=\"message-count\""));
    assert!(html.contains("hx-swap-oob=\"true\""));
    assert!(html.contains("2 messages"));
}

#[tokio::test]
async fn test_empty_submit_emits_nothing() {
    let (server, state, seen) = setup().await;
    let conversation = state.conversations.create_with_id("c1");

    let form = MultipartForm::new()
        .add_text("message", "   ")
        .add_part("files", Part::bytes(Vec::<u8>::new()).file_name(""));
    let response = server.post("/api/chat/c1/send").multipart(form).await;

    response.assert_status_ok();
    assert!(response.text().is_empty());
    assert!(conversation.is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_drop_sends_files_without_text() {
    let (server, state, seen) = setup().await;
    let conversation = state.conversations.create_with_id("c1");

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(b"col1,col2".as_slice())
            .file_name("data.csv")
            .mime_type("text/csv"),
    );
    let response = server.post("/api/chat/c1/drop").multipart(form).await;
    response.assert_status_ok();

    let messages = conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Attached: data.csv");
    assert_eq!(messages[0].references[0].name, "data.csv");
    assert!(seen.lock().unwrap().is_empty());
    assert!(response.text().contains("1 message<"));
}

#[tokio::test]
async fn test_unknown_conversation_is_404() {
    let (server, _, _) = setup().await;

    let form = MultipartForm::new().add_text("message", "hi");
    let response = server
        .post("/api/chat/nope/send")
        .multipart(form)
        .expect_failure()
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_message_card_expand_toggle() {
    let (server, state, _) = setup().await;
    let conversation = state.conversations.create_with_id("c1");
    let message = Message::bot("files below")
        .with_report(AttachmentRef::new("/r/weekly.pdf", "Weekly"));
    let id = message.id.clone();
    conversation.push(message);

    let collapsed = server
        .get(&format!("/api/chat/c1/messages/{id}"))
        .await
        .text();
    assert!(collapsed.contains("max-h-12"));

    let expanded = server
        .get(&format!("/api/chat/c1/messages/{id}"))
        .add_query_param("expanded", "true")
        .await
        .text();
    assert!(!expanded.contains("max-h-12"));
    assert!(expanded.contains("Weekly"));

    server
        .get("/api/chat/c1/messages/missing")
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_messages() {
    let (server, state, _) = setup().await;
    let conversation = state.conversations.create_with_id("c1");
    conversation.push(Message::user("one"));
    conversation.push(Message::bot("two"));

    let html = server.get("/api/chat/c1/messages").await.text();
    assert_eq!(html.matches("class=\"chat-message").count(), 2);
}

#[tokio::test]
async fn test_attachment_route_uploads_and_returns_no_content() {
    let (server, state, seen) = setup().await;
    let conversation = state.conversations.create_with_id("c1");
    let message = Message::bot("save me");
    let id = message.id.clone();
    conversation.push(message);

    let response = server
        .post(&format!("/api/chat/c1/messages/{id}/attachment"))
        .add_query_param("usage", "session")
        .await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);
    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["usage_type"], "session");
}

#[tokio::test]
async fn test_reference_click_goes_through_handler() {
    let (base, _) = spawn_backend().await;
    let clicked: Arc<Mutex<Vec<AttachmentRef>>> = Arc::default();
    let recorder = Arc::clone(&clicked);
    let handler: Arc<dyn ReferenceHandler> = Arc::new(move |r: &AttachmentRef| {
        recorder.lock().unwrap().push(r.clone());
        ReferenceAction::Redirect(format!("/viewer?file={}", r.path))
    });

    let state = AppState::from_config(Arc::new(test_config(&base)))
        .unwrap()
        .with_reference_handler(handler);
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server
        .post("/api/references/open")
        .form(&json!({"path": "/docs/a.pdf", "name": "A"}))
        .await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);
    assert_eq!(response.header("hx-redirect"), "/viewer?file=/docs/a.pdf");
    assert_eq!(clicked.lock().unwrap()[0], AttachmentRef::new("/docs/a.pdf", "A"));
}
