// ============================================================================
// EVENT HANDLING - Listener helpers
// ============================================================================
// MEMORY LEAK NOTES:
// - For listeners on DOM elements: when the element is destroyed (e.g. via
//   set_inner_html("") or Element::remove()), the browser cleans up the
//   attached listeners, so closure.forget() is safe for local listeners.
// - Global listeners (window/document) must only be registered ONCE at app
//   start or they accumulate.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, MouseEvent};

/// Simple click handler.
/// closure.forget() keeps the closure alive for the element's lifetime.
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Simple keydown handler.
pub fn on_keydown<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(KeyboardEvent)>);
    element.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
