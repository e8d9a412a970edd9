//! View contract: the input field, the message container, and alerts.
//!
//! DESIGN
//! ======
//! [`ChatView`] stands in for the page elements the client talks to
//! (`#input-mensaje`, `#mensajes`, `alert()`). Either element may be missing;
//! implementations report that with [`ViewError::MissingElement`] and the
//! controller decides whether to log or alert.
//!
//! [`HtmlView`] keeps the container as an in-memory list of rendered
//! fragments. It backs embedding code that serves the markup elsewhere and
//! doubles as the view in tests.

use crate::error::ViewError;
use crate::render::RenderedMessage;

pub const INPUT_SELECTOR: &str = "#input-mensaje";
pub const CONTAINER_SELECTOR: &str = "#mensajes";

pub trait ChatView: Send {
    /// Current raw value of the input field.
    fn input_value(&self) -> Result<String, ViewError>;

    fn clear_input(&mut self) -> Result<(), ViewError>;

    /// Append a rendered fragment to the end of the container.
    fn append(&mut self, message: &RenderedMessage) -> Result<(), ViewError>;

    /// Scroll the container so the newest message is visible.
    fn scroll_to_bottom(&mut self) -> Result<(), ViewError>;

    /// Blocking, user-facing notification.
    fn alert(&mut self, text: &str);
}

// =============================================================================
// HTML VIEW
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Container {
    messages: Vec<RenderedMessage>,
    /// Index of the first visible message after the last scroll.
    scroll_top: usize,
}

/// In-memory HTML rendition of the chat page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlView {
    input: Option<String>,
    container: Option<Container>,
    alerts: Vec<String>,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlView {
    /// View with an empty input and an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self { input: Some(String::new()), container: Some(Container::default()), alerts: Vec::new() }
    }

    /// Drop the input element, as on pages without a compose box.
    #[must_use]
    pub fn without_input(mut self) -> Self {
        self.input = None;
        self
    }

    #[must_use]
    pub fn without_container(mut self) -> Self {
        self.container = None;
        self
    }

    /// Type into the input field. No-op when the input is missing.
    pub fn set_input(&mut self, value: impl Into<String>) {
        if let Some(input) = self.input.as_mut() {
            *input = value.into();
        }
    }

    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    #[must_use]
    pub fn messages(&self) -> &[RenderedMessage] {
        match &self.container {
            Some(container) => &container.messages,
            None => &[],
        }
    }

    /// True when the newest message is in view.
    #[must_use]
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.container
            .as_ref()
            .is_some_and(|c| c.messages.is_empty() || c.scroll_top + 1 == c.messages.len())
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Container inner HTML: every fragment in append order.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.messages().iter().map(|m| m.html.as_str()).collect()
    }
}

impl ChatView for HtmlView {
    fn input_value(&self) -> Result<String, ViewError> {
        self.input.clone().ok_or(ViewError::MissingElement(INPUT_SELECTOR))
    }

    fn clear_input(&mut self) -> Result<(), ViewError> {
        let input = self.input.as_mut().ok_or(ViewError::MissingElement(INPUT_SELECTOR))?;
        input.clear();
        Ok(())
    }

    fn append(&mut self, message: &RenderedMessage) -> Result<(), ViewError> {
        let container = self.container.as_mut().ok_or(ViewError::MissingElement(CONTAINER_SELECTOR))?;
        container.messages.push(message.clone());
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<(), ViewError> {
        let container = self.container.as_mut().ok_or(ViewError::MissingElement(CONTAINER_SELECTOR))?;
        container.scroll_top = container.messages.len().saturating_sub(1);
        Ok(())
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_owned());
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
