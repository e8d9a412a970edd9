//! # atencion-chat
//!
//! Polling chat client for support conversations ("atenciones").
//!
//! SYSTEM CONTEXT
//! ==============
//! The server owns conversations and messages. This crate only consumes two
//! REST endpoints (send, fetch-since) plus the operator close endpoint, keeps
//! a tiny session (active conversation + last-seen watermark), and renders
//! messages into a [`view::ChatView`] as they arrive.
//!
//! DESIGN
//! ======
//! - [`controller::ChatController`] owns the session and drives both paths.
//! - [`poller`] repeats the inbound fetch on a tokio interval and hands back
//!   a stop handle.
//! - [`render`] and [`escape`] are pure leaf utilities shared by both paths.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod escape;
pub mod poller;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_helpers;

pub use api::{ChatApi, HttpChatApi};
pub use config::ChatConfig;
pub use controller::{ChatController, FetchOutcome, SendOutcome};
pub use error::{ApiError, ChatError, ConfigError, ViewError};
pub use poller::PollerHandle;
pub use session::ChatSession;
pub use types::{ChatMessage, ConversationId, MessageId};
pub use view::{ChatView, HtmlView};
