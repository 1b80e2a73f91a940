//! Chat domain: messages, input state, conversations and attachments.
//!
//! The only markup produced here is rendered markdown and the attachment
//! snapshot; see [`crate::ui`] for the components that display these types.
//!
//! # Example
//!
//! ```rust
//! use chat_desk::chat::{ChatInputState, ConversationStore, Message, UploadedFile};
//!
//! let store = ConversationStore::new();
//! let conversation = store.create();
//!
//! let mut input = ChatInputState::new();
//! input.set_text("Hello!");
//! input.submit(&mut |text: String, _files: Option<Vec<UploadedFile>>| {
//!     conversation.push(Message::user(text));
//! });
//!
//! assert_eq!(conversation.len(), 1);
//! ```

pub mod attachment;
pub mod conversation;
pub mod input;
pub mod markdown;
pub mod message;
pub mod reference;
pub mod service;

pub use attachment::{AttachmentUploader, UploadReceipt, UsageType};
pub use conversation::{Conversation, ConversationStore};
pub use input::{ChatInputState, SendHandler, UploadedFile};
pub use message::{AttachmentRef, Message, MessageKind, MessageView};
pub use reference::{OpenInBrowser, ReferenceAction, ReferenceHandler};
pub use service::ChatService;
