//! Saving a rendered message as an attachment on the backend.
//!
//! The message is rendered to standalone markup, base64-encoded and posted
//! as JSON. Outcomes are logged only; callers never see an error.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{self, Error};
use crate::chat::markdown;
use crate::chat::message::Message;
use crate::config::AppConfig;
use crate::ui::render_fragment;

/// How long the backend keeps an uploaded attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    /// Stored in the database.
    Permanent,
    /// Kept for the current session only.
    Session,
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => f.write_str("permanent"),
            Self::Session => f.write_str("session"),
        }
    }
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    attachment: &'a str,
    usage_type: UsageType,
    modification: bool,
}

/// Reply from the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub status: String,
    #[serde(default)]
    pub attachment_id: Option<String>,
}

impl UploadReceipt {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Standalone markup for a message: body plus one `<img>` block per image.
///
/// Bot content is rendered markdown; user content is escaped text.
pub fn attachment_snapshot(message: &Message) -> String {
    let is_bot = message.is_bot();
    let content = message.content.clone();
    let images = message.images.clone();

    render_fragment(move || {
        let body = if is_bot {
            let html = markdown::render(&content);
            view! { <div class="prose prose-sm max-w-none" inner_html=html></div> }.into_any()
        } else {
            view! { <div class="prose prose-sm max-w-none"><p>{content}</p></div> }.into_any()
        };

        let images = images
            .into_iter()
            .map(|img| {
                view! {
                    <div class="mt-4">
                        <img src=img.path alt=img.name class="max-w-full rounded-lg" />
                    </div>
                }
            })
            .collect_view();

        view! {
            <div class="p-6">
                {body}
                {images}
            </div>
        }
    })
}

/// Base64 (standard alphabet, padded) of the UTF-8 markup.
pub fn encode_snapshot(markup: &str) -> String {
    STANDARD.encode(markup.as_bytes())
}

/// Posts message snapshots to the attachment endpoint.
#[derive(Debug, Clone)]
pub struct AttachmentUploader {
    endpoint: Url,
    http: reqwest::Client,
}

impl AttachmentUploader {
    pub fn new(base_url: &str, upload_path: &str) -> api::Result<Self> {
        Ok(Self {
            endpoint: api::endpoint(base_url, upload_path)?,
            http: reqwest::Client::new(),
        })
    }

    /// Build from config; the attachment base URL falls back to the API one.
    pub fn from_config(config: &AppConfig) -> api::Result<Self> {
        Self::new(
            config.attachments_base_url(),
            &config.attachments.upload_path,
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Snapshot, encode and post a message.
    pub async fn upload(&self, message: &Message, usage: UsageType) -> api::Result<UploadReceipt> {
        let encoded = encode_snapshot(&attachment_snapshot(message));
        let body = UploadRequest {
            attachment: &encoded,
            usage_type: usage,
            modification: false,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RequestFailed {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Fire-and-forget variant of [`upload`](Self::upload).
    ///
    /// Failures are logged and swallowed.
    pub async fn save(&self, message: &Message, usage: UsageType) -> Option<UploadReceipt> {
        match self.upload(message, usage).await {
            Ok(receipt) => {
                if receipt.is_success() {
                    tracing::info!(
                        name: "attachment.uploaded",
                        message_id = %message.id,
                        usage = %usage,
                        attachment_id = ?receipt.attachment_id,
                        "Attachment uploaded successfully"
                    );
                } else {
                    tracing::warn!(
                        name: "attachment.rejected",
                        message_id = %message.id,
                        status = %receipt.status,
                        "Attachment upload not accepted"
                    );
                }
                Some(receipt)
            }
            Err(e) => {
                tracing::error!(
                    name: "attachment.failed",
                    message_id = %message.id,
                    error = %e,
                    "Error creating attachment"
                );
                None
            }
        }
    }
}
