// ============================================================================
// ELEMENT HELPERS - Basic DOM manipulation functions
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Global window
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Element by ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Create an element
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Set class name (replaces all classes)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Add one class
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remove one class
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Set text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Set inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Append a child
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Set an attribute
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Append an element to document body
pub fn append_to_body(element: &Element) -> Result<(), JsValue> {
    let body = document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("No document body"))?;
    body.append_child(element).map(|_| ())
}
