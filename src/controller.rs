//! Chat controller: session state plus the outbound and inbound paths.
//!
//! DESIGN
//! ======
//! The controller owns a [`ChatSession`] and a [`ChatView`] behind
//! `std::sync::Mutex`es that are only held between awaits, never across one.
//! A send and a poll can therefore be in flight together: each reads the
//! session when its request starts and writes it when the response lands,
//! in arrival order.
//!
//! ERROR HANDLING
//! ==============
//! - Poll failures are logged at `warn` and returned; the poller ignores them
//!   and tries again on the next tick.
//! - Send and close failures are logged at `error` and alerted through the
//!   view, then returned to the caller.
//! - A missing container is logged and skips the watermark update for that
//!   message.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::api::ChatApi;
use crate::error::{ChatError, ViewError};
use crate::render::render_message;
use crate::session::ChatSession;
use crate::types::{ChatMessage, ConversationId, MessageId};
use crate::view::ChatView;

pub const SEND_FAILED_ALERT: &str = "No se pudo enviar el mensaje. Revisa la consola.";
pub const INPUT_MISSING_ALERT: &str = "No se encontró el campo de texto.";
pub const CLOSE_FAILED_ALERT: &str = "No se pudo cerrar la atención. Revisa la consola.";

/// Result of one inbound fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No active conversation; no request was made.
    Skipped,
    /// Number of messages appended.
    Appended(usize),
}

/// Result of a send attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; no request was made.
    Empty,
    Sent { id: MessageId, conversation_id: Option<ConversationId> },
}

pub struct ChatController<A, V> {
    api: A,
    view: Mutex<V>,
    session: Mutex<ChatSession>,
    viewer_is_operator: bool,
}

impl<A: ChatApi, V: ChatView> ChatController<A, V> {
    #[must_use]
    pub fn new(api: A, view: V, session: ChatSession, viewer_is_operator: bool) -> Self {
        Self { api, view: Mutex::new(view), session: Mutex::new(session), viewer_is_operator }
    }

    #[must_use]
    pub fn viewer_is_operator(&self) -> bool {
        self.viewer_is_operator
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> ChatSession {
        *self.lock_session()
    }

    /// Run `f` with the view locked.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut *self.lock_view())
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Fetch messages newer than the watermark and append them in the order
    /// received.
    ///
    /// # Errors
    ///
    /// Returns the API error of a failed request. The failure is already
    /// logged; callers polling on a timer can drop it.
    pub async fn fetch_new_messages(&self) -> Result<FetchOutcome, ChatError> {
        let (conversation_id, after) = {
            let session = self.lock_session();
            match session.conversation_id() {
                Some(id) => (id, session.last_seen_id()),
                None => return Ok(FetchOutcome::Skipped),
            }
        };

        let messages = match self.api.fetch_messages(conversation_id, after).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!(conversation_id, after, error = %e, "fetching messages failed");
                return Err(e.into());
            }
        };

        debug!(conversation_id, after, count = messages.len(), "fetched messages");
        for message in &messages {
            // Missing container is logged inside; keep going like the page does.
            let _ = self.append_message(message);
        }
        Ok(FetchOutcome::Appended(messages.len()))
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Send the current input. Empty input is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the input element is missing or the request
    /// fails. Both are logged and alerted before returning; the input keeps
    /// its text.
    pub async fn send_message(&self) -> Result<SendOutcome, ChatError> {
        let input = self.lock_view().input_value();
        let raw = match input {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "cannot read message input");
                self.lock_view().alert(INPUT_MISSING_ALERT);
                return Err(e.into());
            }
        };

        let text = raw.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Empty);
        }

        let conversation_id = self.lock_session().conversation_id();
        let sent = match self.api.send_message(conversation_id, text).await {
            Ok(sent) => sent,
            Err(e) => {
                error!(?conversation_id, error = %e, "sending message failed");
                self.lock_view().alert(SEND_FAILED_ALERT);
                return Err(e.into());
            }
        };

        self.lock_session().adopt_conversation(sent.conversation_id);
        let _ = self.append_message(&sent.message);
        let cleared = self.lock_view().clear_input();
        if let Err(e) = cleared {
            warn!(error = %e, "cannot clear message input");
        }

        Ok(SendOutcome::Sent { id: sent.message.id, conversation_id: self.lock_session().conversation_id() })
    }

    /// Close the active conversation (operators only) and stop polling it.
    ///
    /// # Errors
    ///
    /// [`ChatError::NotOperator`] and [`ChatError::NoConversation`] are
    /// returned without a request. Request failures are logged and alerted.
    pub async fn close_conversation(&self) -> Result<ConversationId, ChatError> {
        if !self.viewer_is_operator {
            return Err(ChatError::NotOperator);
        }
        let conversation_id = self.lock_session().conversation_id().ok_or(ChatError::NoConversation)?;

        if let Err(e) = self.api.close_conversation(conversation_id).await {
            error!(conversation_id, error = %e, "closing conversation failed");
            self.lock_view().alert(CLOSE_FAILED_ALERT);
            return Err(e.into());
        }

        let mut session = self.lock_session();
        if session.conversation_id() == Some(conversation_id) {
            session.clear_conversation();
        }
        Ok(conversation_id)
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Render `message` into the container, scroll to it, and move the
    /// watermark to its id.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MissingElement`] when the container is absent; the
    /// watermark is left untouched in that case.
    pub fn append_message(&self, message: &ChatMessage) -> Result<(), ViewError> {
        let rendered = render_message(message, self.viewer_is_operator);
        {
            let mut view = self.lock_view();
            let appended = view.append(&rendered).and_then(|()| view.scroll_to_bottom());
            if let Err(e) = appended {
                error!(message_id = message.id, error = %e, "cannot render message");
                return Err(e);
            }
        }
        self.lock_session().mark_seen(message.id);
        Ok(())
    }

    fn lock_session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_view(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
