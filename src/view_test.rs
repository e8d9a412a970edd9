use super::*;
use crate::render::render_message;
use crate::types::ChatMessage;

fn rendered(id: i64, text: &str) -> RenderedMessage {
    let msg = ChatMessage { id, text: Some(text.to_owned()), from_operator: false, timestamp: "11:00".to_owned() };
    render_message(&msg, false)
}

#[test]
fn new_view_is_empty_and_at_bottom() {
    let view = HtmlView::new();
    assert_eq!(view.input(), Some(""));
    assert!(view.messages().is_empty());
    assert!(view.is_scrolled_to_bottom());
    assert_eq!(view.to_html(), "");
}

#[test]
fn append_without_scroll_leaves_new_message_out_of_view() {
    let mut view = HtmlView::new();
    view.append(&rendered(1, "a")).unwrap();
    view.scroll_to_bottom().unwrap();
    view.append(&rendered(2, "b")).unwrap();
    assert!(!view.is_scrolled_to_bottom());
    view.scroll_to_bottom().unwrap();
    assert!(view.is_scrolled_to_bottom());
}

#[test]
fn to_html_concatenates_fragments_in_order() {
    let mut view = HtmlView::new();
    let first = rendered(1, "a");
    let second = rendered(2, "b");
    view.append(&first).unwrap();
    view.append(&second).unwrap();
    assert_eq!(view.to_html(), format!("{}{}", first.html, second.html));
}

#[test]
fn input_round_trip_and_clear() {
    let mut view = HtmlView::new();
    view.set_input("  hola ");
    assert_eq!(view.input_value().unwrap(), "  hola ");
    view.clear_input().unwrap();
    assert_eq!(view.input(), Some(""));
}

#[test]
fn missing_input_reports_selector() {
    let mut view = HtmlView::new().without_input();
    view.set_input("ignored");
    assert_eq!(view.input_value(), Err(ViewError::MissingElement(INPUT_SELECTOR)));
    assert_eq!(view.clear_input(), Err(ViewError::MissingElement(INPUT_SELECTOR)));
}

#[test]
fn missing_container_reports_selector() {
    let mut view = HtmlView::new().without_container();
    assert_eq!(view.append(&rendered(1, "a")), Err(ViewError::MissingElement(CONTAINER_SELECTOR)));
    assert_eq!(view.scroll_to_bottom(), Err(ViewError::MissingElement(CONTAINER_SELECTOR)));
    assert!(!view.is_scrolled_to_bottom());
}

#[test]
fn alerts_are_recorded() {
    let mut view = HtmlView::new();
    view.alert("boom");
    assert_eq!(view.alerts(), ["boom".to_owned()]);
}
