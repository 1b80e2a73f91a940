//! Chat Desk
//!
//! A small chat web UI: a text/file input, server-rendered message cards with
//! markdown, image grids and reference attachments, and a client for the
//! query backend that answers the user's messages.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving the page and HTMX fragment routes
//! - **UI**: Leptos SSR components + HTMX attributes
//! - **Chat**: Message model, input state, conversations, attachment upload
//! - **API**: Single-endpoint query client
//!
//! # Modules
//!
//! - [`api`]: Query backend client
//! - [`chat`]: Chat domain types and services
//! - [`config`]: Layered configuration
//! - [`server`]: HTTP routes
//! - [`ui`]: Leptos components

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::needless_pass_by_value)]

pub mod api;
pub mod chat;
pub mod config;
pub mod server;
pub mod ui;

use std::fmt;
use std::sync::Arc;

use crate::api::QueryClient;
use crate::chat::{AttachmentUploader, ChatService, ConversationStore, OpenInBrowser, ReferenceHandler};
use crate::config::AppConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// Conversations keyed by id.
    pub conversations: ConversationStore,
    /// Send path: user message → query backend → bot message.
    pub chat: Arc<ChatService>,
    /// Attachment upload client.
    pub uploader: Arc<AttachmentUploader>,
    /// Receives reference and image clicks.
    pub references: Arc<dyn ReferenceHandler>,
}

impl AppState {
    /// Wire up clients from configuration with the default reference handler.
    pub fn from_config(config: Arc<AppConfig>) -> api::Result<Self> {
        let client = QueryClient::from_config(&config.api)?;
        let uploader = AttachmentUploader::from_config(&config)?;

        Ok(Self {
            config,
            conversations: ConversationStore::new(),
            chat: Arc::new(ChatService::new(client)),
            uploader: Arc::new(uploader),
            references: Arc::new(OpenInBrowser),
        })
    }

    /// Replace the reference click handler.
    #[must_use]
    pub fn with_reference_handler(mut self, handler: Arc<dyn ReferenceHandler>) -> Self {
        self.references = handler;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("conversations", &self.conversations.len())
            .field("query_endpoint", &self.chat.client().endpoint().as_str())
            .field("upload_endpoint", &self.uploader.endpoint().as_str())
            .finish_non_exhaustive()
    }
}
