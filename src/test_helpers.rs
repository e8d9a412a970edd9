//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::ChatApi;
use crate::error::ApiError;
use crate::types::{ChatMessage, ConversationId, MessageId, SentMessage};

/// One call observed by [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { conversation_id: Option<ConversationId>, text: String },
    Fetch { conversation_id: ConversationId, after: MessageId },
    Close { conversation_id: ConversationId },
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    send_results: VecDeque<Result<SentMessage, ApiError>>,
    fetch_results: VecDeque<Result<Vec<ChatMessage>, ApiError>>,
    close_results: VecDeque<Result<(), ApiError>>,
    next_id: MessageId,
}

/// Scripted [`ChatApi`]. Clones share state, so a test can keep one handle
/// and move another into the controller.
///
/// With nothing queued: sends echo the text back with increasing ids,
/// fetches return no messages, closes succeed.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn push_send(&self, result: Result<SentMessage, ApiError>) {
        self.state.lock().unwrap().send_results.push_back(result);
    }

    pub fn push_fetch(&self, result: Result<Vec<ChatMessage>, ApiError>) {
        self.state.lock().unwrap().fetch_results.push_back(result);
    }

    pub fn push_close(&self, result: Result<(), ApiError>) {
        self.state.lock().unwrap().close_results.push_back(result);
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn send_message(&self, conversation_id: Option<ConversationId>, text: &str) -> Result<SentMessage, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Send { conversation_id, text: text.to_owned() });
        if let Some(result) = state.send_results.pop_front() {
            return result;
        }
        state.next_id += 1;
        Ok(SentMessage { message: message(state.next_id, text, false), conversation_id })
    }

    async fn fetch_messages(&self, conversation_id: ConversationId, after: MessageId) -> Result<Vec<ChatMessage>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Fetch { conversation_id, after });
        state.fetch_results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn close_conversation(&self, conversation_id: ConversationId) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Close { conversation_id });
        state.close_results.pop_front().unwrap_or(Ok(()))
    }
}

pub fn message(id: MessageId, text: &str, from_operator: bool) -> ChatMessage {
    ChatMessage { id, text: Some(text.to_owned()), from_operator, timestamp: "10:00".to_owned() }
}

pub fn sent(id: MessageId, text: &str, conversation_id: Option<ConversationId>) -> SentMessage {
    SentMessage { message: message(id, text, false), conversation_id }
}
