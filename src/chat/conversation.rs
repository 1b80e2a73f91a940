//! Conversation threads and their in-memory store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::chat::message::Message;

/// A single conversation: an ordered list of messages.
///
/// Cloning is cheap and yields a handle to the same conversation.
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

#[derive(Debug)]
struct ConversationInner {
    id: String,
    messages: RwLock<Vec<Message>>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Conversation {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(ConversationInner {
                id,
                messages: RwLock::new(Vec::new()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        *self.inner.last_activity.read().unwrap()
    }

    /// Append a message.
    pub fn push(&self, message: Message) {
        let mut guard = self.inner.messages.write().unwrap();
        guard.push(message);
        drop(guard);
        self.touch();
    }

    /// Snapshot of all messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.messages.read().unwrap().clone()
    }

    /// Look up a message by id.
    #[must_use]
    pub fn get(&self, message_id: &str) -> Option<Message> {
        self.inner
            .messages
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == message_id)
            .cloned()
    }

    /// Remove a message by id.
    pub fn remove(&self, message_id: &str) -> Option<Message> {
        let mut guard = self.inner.messages.write().unwrap();
        let idx = guard.iter().position(|m| m.id == message_id)?;
        let removed = guard.remove(idx);
        drop(guard);
        self.touch();
        Some(removed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.messages.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every message.
    pub fn clear(&self) {
        self.inner.messages.write().unwrap().clear();
        self.touch();
    }

    /// Whether the conversation has been idle for longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        // A negative idle time (clock skew) never expires.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }

    fn touch(&self) {
        let mut guard = self.inner.last_activity.write().unwrap();
        *guard = Utc::now();
    }
}

/// Thread-safe store for conversations.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation with a fresh UUID.
    #[must_use]
    pub fn create(&self) -> Conversation {
        self.create_with_id(Uuid::new_v4().to_string())
    }

    /// Create (or replace) a conversation with a specific id.
    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Conversation {
        let id = id.into();
        let conversation = Conversation::new(id.clone());
        self.inner
            .write()
            .unwrap()
            .insert(id, conversation.clone());
        conversation
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// Get a conversation by id, creating it if needed.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> Conversation {
        {
            let guard = self.inner.read().unwrap();
            if let Some(conversation) = guard.get(id) {
                return conversation.clone();
            }
        }

        let mut guard = self.inner.write().unwrap();
        guard
            .entry(id.to_string())
            .or_insert_with(|| Conversation::new(id.to_string()))
            .clone()
    }

    pub fn remove(&self, id: &str) -> Option<Conversation> {
        self.inner.write().unwrap().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn list_ids(&self) -> Vec<String> {
        self.inner.read().unwrap().keys().cloned().collect()
    }

    /// Remove conversations idle for longer than `timeout`.
    ///
    /// Returns the number of conversations removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap();
        let before = guard.len();
        guard.retain(|_, conversation| !conversation.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_lifecycle() {
        let conversation = Conversation::new("c-1".to_string());
        assert_eq!(conversation.id(), "c-1");
        assert!(conversation.is_empty());

        let user = Message::user("Hello");
        let user_id = user.id.clone();
        conversation.push(user);
        conversation.push(Message::bot("Hi there!"));
        assert_eq!(conversation.len(), 2);

        assert_eq!(conversation.get(&user_id).unwrap().content, "Hello");
        assert!(conversation.get("missing").is_none());

        let removed = conversation.remove(&user_id).unwrap();
        assert_eq!(removed.content, "Hello");
        assert_eq!(conversation.messages()[0].content, "Hi there!");

        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.last_activity() >= conversation.created_at());
    }

    #[test]
    fn test_store() {
        let store = ConversationStore::new();
        assert!(store.is_empty());

        let conversation = store.create();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(conversation.id()).unwrap().id(), conversation.id());

        let same = store.get_or_create(conversation.id());
        same.push(Message::user("shared"));
        assert_eq!(conversation.len(), 1);

        let _ = store.get_or_create("named");
        assert_eq!(store.len(), 2);
        assert!(store.list_ids().contains(&"named".to_string()));

        store.remove(conversation.id());
        assert_eq!(store.len(), 1);
    }

    fn idle_for(conversation: &Conversation, idle: chrono::Duration) {
        *conversation.inner.last_activity.write().unwrap() = Utc::now() - idle;
    }

    #[test]
    fn test_expiry() {
        let conversation = Conversation::new("c-1".to_string());
        let timeout = Duration::from_secs(60);
        assert!(!conversation.is_expired_with_timeout(timeout));

        idle_for(&conversation, chrono::Duration::seconds(120));
        assert!(conversation.is_expired_with_timeout(timeout));

        // Activity resets the idle clock.
        conversation.push(Message::user("back"));
        assert!(!conversation.is_expired_with_timeout(timeout));
    }

    #[test]
    fn test_cleanup_removes_only_idle_conversations() {
        let store = ConversationStore::new();
        let stale = store.create_with_id("stale");
        let _fresh = store.create_with_id("fresh");
        idle_for(&stale, chrono::Duration::minutes(45));

        let removed = store.cleanup_expired_with_timeout(Duration::from_secs(30 * 60));

        assert_eq!(removed, 1);
        assert!(store.get("stale").is_none());
        assert!(store.get("fresh").is_some());
        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_secs(30 * 60)), 0);
    }
}
