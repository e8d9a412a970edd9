//! REST client for the chat endpoints.
//!
//! [`ChatApi`] is the seam the controller depends on; [`HttpChatApi`] is the
//! reqwest implementation. Body parsing lives in pure functions so it can be
//! tested without a server.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::config::{ChatConfig, normalize_base_url};
use crate::error::ApiError;
use crate::types::{
    ChatMessage, CloseResponse, ConversationId, MessageId, SendMessageRequest, SendMessageResponse, SentMessage,
};

pub const SEND_PATH: &str = "/api/enviar-mensaje";

/// Server operations the chat client consumes.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/enviar-mensaje`. `None` lets the server pick or create the
    /// conversation.
    async fn send_message(&self, conversation_id: Option<ConversationId>, text: &str) -> Result<SentMessage, ApiError>;

    /// `GET /api/obtener-mensajes/{id}?ultimo_id={after}`: every message with
    /// an id greater than `after`, ascending.
    async fn fetch_messages(&self, conversation_id: ConversationId, after: MessageId) -> Result<Vec<ChatMessage>, ApiError>;

    /// `POST /api/cerrar-atencion/{id}` (operators only).
    async fn close_conversation(&self, conversation_id: ConversationId) -> Result<(), ApiError>;
}

// =============================================================================
// PATHS
// =============================================================================

#[must_use]
pub fn fetch_path(conversation_id: ConversationId, after: MessageId) -> String {
    format!("/api/obtener-mensajes/{conversation_id}?ultimo_id={after}")
}

#[must_use]
pub fn close_path(conversation_id: ConversationId) -> String {
    format!("/api/cerrar-atencion/{conversation_id}")
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpChatApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatApi {
    /// # Errors
    ///
    /// Returns an error if the cookie is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &ChatConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref() {
            let value = HeaderValue::from_str(cookie).map_err(|e| ApiError::ClientBuild(e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: normalize_base_url(&config.base_url) })
    }

    /// Client against `base_url` with default timeouts and no cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Self::new(&ChatConfig { base_url: base_url.to_owned(), ..ChatConfig::default() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return the body text of a 2xx response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, conversation_id: Option<ConversationId>, text: &str) -> Result<SentMessage, ApiError> {
        let body = SendMessageRequest { conversation_id, text };
        let request = self.http.post(self.url(SEND_PATH)).json(&body);
        let text = self.execute(request).await?;
        parse_send_response(&text)
    }

    async fn fetch_messages(&self, conversation_id: ConversationId, after: MessageId) -> Result<Vec<ChatMessage>, ApiError> {
        let request = self.http.get(self.url(&fetch_path(conversation_id, after)));
        let text = self.execute(request).await?;
        parse_messages(&text)
    }

    async fn close_conversation(&self, conversation_id: ConversationId) -> Result<(), ApiError> {
        let request = self.http.post(self.url(&close_path(conversation_id)));
        let text = self.execute(request).await?;
        parse_close_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_send_response(json: &str) -> Result<SentMessage, ApiError> {
    let resp: SendMessageResponse = serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(resp.into_sent())
}

pub(crate) fn parse_messages(json: &str) -> Result<Vec<ChatMessage>, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

pub(crate) fn parse_close_response(json: &str) -> Result<(), ApiError> {
    if json.trim().is_empty() {
        return Ok(());
    }
    let resp: CloseResponse = serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;
    if resp.status.is_empty() || resp.status == "ok" {
        Ok(())
    } else {
        Err(ApiError::Parse(format!("unexpected close status: {}", resp.status)))
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
