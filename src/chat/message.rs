//! Chat message model and per-message view state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Reply produced by the query backend. Content is markdown.
    Bot,
    /// Text typed by the person using the UI. Content is plain text.
    User,
}

/// A named pointer to a file or report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Location of the file, used as link target and `<img src>`.
    pub path: String,
    /// Display name.
    pub name: String,
}

impl AttachmentRef {
    /// Create a new reference.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// A single chat message.
///
/// Images, references and the report are independent of each other; any
/// combination (including none) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<AttachmentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<AttachmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AttachmentRef>,
}

/// Keys checked, in order, for the reply text in a backend response.
const CONTENT_KEYS: [&str; 5] = ["response", "answer", "content", "message", "text"];

impl Message {
    fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            images: Vec::new(),
            references: Vec::new(),
            report: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    /// Create a bot message with markdown content.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, content)
    }

    /// Attach images (builder style).
    #[must_use]
    pub fn with_images(mut self, images: Vec<AttachmentRef>) -> Self {
        self.images = images;
        self
    }

    /// Attach references (builder style).
    #[must_use]
    pub fn with_references(mut self, references: Vec<AttachmentRef>) -> Self {
        self.references = references;
        self
    }

    /// Attach a report (builder style).
    #[must_use]
    pub fn with_report(mut self, report: AttachmentRef) -> Self {
        self.report = Some(report);
        self
    }

    /// Whether this message was produced by the backend.
    pub fn is_bot(&self) -> bool {
        self.kind == MessageKind::Bot
    }

    /// Build a bot message from a query backend reply.
    ///
    /// The reply shape is not fixed: the first string under one of
    /// [`CONTENT_KEYS`] becomes the content, a bare JSON string is used as-is,
    /// and anything else is shown as pretty-printed JSON. `images`,
    /// `references` and `report` are picked up when they parse.
    pub fn bot_from_response(body: &Value) -> Self {
        let content = match body {
            Value::String(text) => text.clone(),
            Value::Object(map) => CONTENT_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map_or_else(|| pretty(body), str::to_string),
            other => pretty(other),
        };

        let mut message = Self::bot(content);
        message.images = refs_at(body, "images");
        message.references = refs_at(body, "references");
        message.report = body
            .get("report")
            .and_then(|v| serde_json::from_value(v.clone()).ok());
        message
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn refs_at(body: &Value, key: &str) -> Vec<AttachmentRef> {
    body.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

/// Render state of one message card.
///
/// The only local state a card has is whether its attachment section is
/// expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    message: Message,
    expanded: bool,
}

impl MessageView {
    /// Wrap a message, collapsed.
    pub fn new(message: Message) -> Self {
        Self {
            message,
            expanded: false,
        }
    }

    /// Wrap a message with an explicit expanded state.
    pub fn with_expanded(message: Message, expanded: bool) -> Self {
        Self { message, expanded }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Bot messages with at least one image, reference, or a report.
    pub fn has_attachments(&self) -> bool {
        self.message.is_bot()
            && (!self.message.references.is_empty()
                || !self.message.images.is_empty()
                || self.message.report.is_some())
    }

    /// Whether the attachment section is height-capped.
    pub fn is_capped(&self) -> bool {
        self.has_attachments() && !self.expanded
    }

    /// Flip between capped and uncapped.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }
}
