//! Session state: active conversation and the last-seen watermark.

use crate::types::{ConversationId, MessageId};

/// Per-view chat session.
///
/// A conversation id of `0` is treated as absent everywhere, since the
/// server never issues it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatSession {
    conversation_id: Option<ConversationId>,
    last_seen_id: MessageId,
}

impl ChatSession {
    #[must_use]
    pub fn new(conversation_id: Option<ConversationId>, last_seen_id: MessageId) -> Self {
        Self { conversation_id: conversation_id.filter(|id| *id != 0), last_seen_id }
    }

    #[must_use]
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.conversation_id
    }

    #[must_use]
    pub fn last_seen_id(&self) -> MessageId {
        self.last_seen_id
    }

    #[must_use]
    pub fn has_conversation(&self) -> bool {
        self.conversation_id.is_some()
    }

    /// Adopt a conversation reported by the server. Absent or zero ids keep
    /// the current one.
    pub fn adopt_conversation(&mut self, conversation_id: Option<ConversationId>) {
        if let Some(id) = conversation_id.filter(|id| *id != 0) {
            self.conversation_id = Some(id);
        }
    }

    pub fn clear_conversation(&mut self) {
        self.conversation_id = None;
    }

    /// Move the watermark to `id`. No max comparison: callers must append in
    /// ascending id order.
    pub fn mark_seen(&mut self, id: MessageId) {
        self.last_seen_id = id;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
