use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chat_desk::chat::{AttachmentRef, AttachmentUploader, Message, UsageType};
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn recording_backend() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route(
            "/api/attachment/upload",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({ "status": "success", "attachment_id": "att-42" }))
            }),
        )
        .with_state(Arc::clone(&seen));
    (spawn_backend(app).await, seen)
}

#[tokio::test]
async fn test_upload_posts_encoded_snapshot() {
    let (base, seen) = recording_backend().await;
    let uploader = AttachmentUploader::new(&base, "/api/attachment/upload").unwrap();
    let message = Message::bot("Quarterly **numbers**")
        .with_images(vec![AttachmentRef::new("/charts/q3.png", "Q3 chart")]);

    let receipt = uploader.upload(&message, UsageType::Permanent).await.unwrap();
    assert!(receipt.is_success());
    assert_eq!(receipt.attachment_id.as_deref(), Some("att-42"));

    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["usage_type"], "permanent");
    assert_eq!(bodies[0]["modification"], false);

    let decoded = STANDARD
        .decode(bodies[0]["attachment"].as_str().unwrap())
        .unwrap();
    let markup = String::from_utf8(decoded).unwrap();
    assert!(markup.contains("<strong>numbers</strong>"));
    assert!(markup.contains(r#"<img src="/charts/q3.png" alt="Q3 chart""#));
}

#[tokio::test]
async fn test_save_session_mode() {
    let (base, seen) = recording_backend().await;
    let uploader = AttachmentUploader::new(&base, "/api/attachment/upload").unwrap();

    let receipt = uploader.save(&Message::bot("hi"), UsageType::Session).await;

    assert!(receipt.is_some());
    assert_eq!(seen.lock().unwrap()[0]["usage_type"], "session");
}

#[tokio::test]
async fn test_save_swallows_failures() {
    let app = Router::new().route(
        "/api/attachment/upload",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_backend(app).await;
    let uploader = AttachmentUploader::new(&base, "/api/attachment/upload").unwrap();

    assert!(uploader.save(&Message::bot("x"), UsageType::Permanent).await.is_none());

    let unreachable = AttachmentUploader::new("http://127.0.0.1:9", "/upload").unwrap();
    assert!(unreachable.save(&Message::bot("x"), UsageType::Session).await.is_none());
}
