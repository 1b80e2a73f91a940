//! URLs the rendered markup points HTMX at.
//!
//! The server mounts its handlers on the same paths, so both sides build
//! them from here.

use crate::chat::UsageType;

/// Route for reference clicks; not tied to a conversation.
pub const REFERENCE_OPEN_PATH: &str = "/api/references/open";

/// Per-conversation route builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoutes {
    conversation_id: String,
}

impl ChatRoutes {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    fn base(&self) -> String {
        format!("/api/chat/{}", self.conversation_id)
    }

    pub fn send_url(&self) -> String {
        format!("{}/send", self.base())
    }

    pub fn drop_url(&self) -> String {
        format!("{}/drop", self.base())
    }

    /// Card URL with the expanded state it should render in.
    pub fn message_url(&self, message_id: &str, expanded: bool) -> String {
        format!("{}/messages/{message_id}?expanded={expanded}", self.base())
    }

    pub fn attachment_url(&self, message_id: &str, usage: UsageType) -> String {
        format!("{}/messages/{message_id}/attachment?usage={usage}", self.base())
    }

    pub fn reference_url(&self) -> &'static str {
        REFERENCE_OPEN_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_shapes() {
        let routes = ChatRoutes::new("c1");
        assert_eq!(routes.send_url(), "/api/chat/c1/send");
        assert_eq!(routes.drop_url(), "/api/chat/c1/drop");
        assert_eq!(routes.reference_url(), "/api/references/open");
        assert_eq!(
            routes.message_url("m1", true),
            "/api/chat/c1/messages/m1?expanded=true"
        );
        assert_eq!(
            routes.attachment_url("m1", UsageType::Permanent),
            "/api/chat/c1/messages/m1/attachment?usage=permanent"
        );
    }
}
