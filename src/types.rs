//! Wire types for the chat endpoints.
//!
//! Field names on the wire are the server's (`mensaje`, `es_encargado`,
//! `fecha`, `atencion_id`); Rust names describe what they hold.

use serde::{Deserialize, Serialize};

pub type ConversationId = i64;
pub type MessageId = i64;

/// A single chat message as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    /// Message body. The server column is nullable.
    #[serde(rename = "mensaje", default)]
    pub text: Option<String>,
    /// True when an operator authored the message.
    #[serde(rename = "es_encargado")]
    pub from_operator: bool,
    /// Display timestamp, already formatted by the server (`HH:MM`).
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

/// Body of `POST /api/enviar-mensaje`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessageRequest<'a> {
    /// `null` asks the server to find or create the user's open conversation.
    #[serde(rename = "atencion_id")]
    pub conversation_id: Option<ConversationId>,
    #[serde(rename = "mensaje")]
    pub text: &'a str,
}

/// Parsed success body of `POST /api/enviar-mensaje`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message: ChatMessage,
    /// Conversation the message landed in, if the server reported it.
    pub conversation_id: Option<ConversationId>,
}

/// Accepted shapes of the send response: the message flattened next to
/// `atencion_id`, or nested under `message`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum SendMessageResponse {
    Nested {
        #[serde(default)]
        atencion_id: Option<ConversationId>,
        message: ChatMessage,
    },
    Flat {
        #[serde(default)]
        atencion_id: Option<ConversationId>,
        #[serde(flatten)]
        message: ChatMessage,
    },
}

impl SendMessageResponse {
    pub(crate) fn into_sent(self) -> SentMessage {
        match self {
            Self::Nested { atencion_id, message } | Self::Flat { atencion_id, message } => {
                SentMessage { message, conversation_id: atencion_id }
            }
        }
    }
}

/// Success body of `POST /api/cerrar-atencion/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloseResponse {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
