//! Message fragment rendering.
//!
//! Produces the markup appended to the `#mensajes` container:
//!
//! ```text
//! <div class="mensaje enviado" data-id="7">
//!   <div class="mensaje-contenido"><p>TEXT</p><span class="hora">10:42</span></div>
//! </div>
//! ```
//!
//! (emitted without the whitespace shown above).

use crate::escape::{escape_html, escape_optional};
use crate::types::{ChatMessage, MessageId};

/// Which side of the conversation a message is drawn on, from the viewer's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Sent,
    Received,
}

impl Alignment {
    /// Sent when viewer and sender share the operator flag, received
    /// otherwise.
    #[must_use]
    pub fn for_viewer(viewer_is_operator: bool, sender_is_operator: bool) -> Self {
        if viewer_is_operator == sender_is_operator { Self::Sent } else { Self::Received }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Sent => "enviado",
            Self::Received => "recibido",
        }
    }
}

/// A message ready to be placed in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub id: MessageId,
    pub alignment: Alignment,
    /// Unescaped body, for views that do not speak HTML.
    pub text: String,
    pub timestamp: String,
    /// Complete escaped fragment.
    pub html: String,
}

#[must_use]
pub fn render_message(message: &ChatMessage, viewer_is_operator: bool) -> RenderedMessage {
    let alignment = Alignment::for_viewer(viewer_is_operator, message.from_operator);
    let html = format!(
        r#"<div class="mensaje {class}" data-id="{id}"><div class="mensaje-contenido"><p>{text}</p><span class="hora">{hora}</span></div></div>"#,
        class = alignment.css_class(),
        id = message.id,
        text = escape_optional(message.text.as_deref()),
        hora = escape_html(&message.timestamp),
    );
    RenderedMessage {
        id: message.id,
        alignment,
        text: message.text.clone().unwrap_or_default(),
        timestamp: message.timestamp.clone(),
        html,
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
