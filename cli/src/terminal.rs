//! Terminal rendition of the chat view.
//!
//! Messages are printed one per line as they arrive; the "input field" is a
//! buffer the stdin loop fills before each send.

use std::io::Write;

use atencion_chat::ViewError;
use atencion_chat::render::{Alignment, RenderedMessage};
use atencion_chat::view::ChatView;

pub struct TerminalView<W> {
    out: W,
    input: String,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, input: String::new() }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

/// `[10:42] > hola` for own messages, `[10:42] < hola` for the other side.
pub fn format_message(message: &RenderedMessage) -> String {
    let marker = match message.alignment {
        Alignment::Sent => '>',
        Alignment::Received => '<',
    };
    format!("[{}] {marker} {}", printable(&message.timestamp), printable(&message.text))
}

/// Server text with control characters spelled out (`\n`, `\u{1b}`), so a
/// message stays on one line and cannot drive the terminal.
pub fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn input_value(&self) -> Result<String, ViewError> {
        Ok(self.input.clone())
    }

    fn clear_input(&mut self) -> Result<(), ViewError> {
        self.input.clear();
        Ok(())
    }

    fn append(&mut self, message: &RenderedMessage) -> Result<(), ViewError> {
        let line = format_message(message);
        self.write_line(&line);
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<(), ViewError> {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "terminal flush failed");
        }
        Ok(())
    }

    fn alert(&mut self, text: &str) {
        self.write_line(&format!("! {}", printable(text)));
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
