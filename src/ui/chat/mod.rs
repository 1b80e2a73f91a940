//! Chat-specific UI components.
//!
//! Cards and input are rendered on the server; HTMX swaps fresh fragments
//! into `#message-list` as the conversation grows.

mod header;
mod input;
mod message;
mod message_list;
mod shell;

pub use header::{ChatHeader, MessageCount};
pub use input::ChatInput;
pub use message::{ChatMessageCard, card_dom_id};
pub use message_list::ChatMessageList;
pub use shell::ChatShell;
