// ============================================================================
// SPECS NEXUS CHECK-IN CLIENT
// ============================================================================
// Officer-facing event attendance screen:
// - scanner: check-in state machine + decoder engine boundary (pure logic,
//   tested off-browser)
// - views/dom: DOM rendering without a framework
// - viewmodels: glue between state machine, camera, and backend
// - services: HTTP communication only
// - state: Rc<RefCell> state with change notifications
// ============================================================================

pub mod config;
pub mod models;
pub mod scanner;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod services;
#[cfg(target_arch = "wasm32")]
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod utils;
#[cfg(target_arch = "wasm32")]
pub mod viewmodels;
#[cfg(target_arch = "wasm32")]
pub mod views;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Single app instance for the page
#[cfg(target_arch = "wasm32")]
thread_local! {
    static APP: RefCell<Option<app::App>> = RefCell::new(None);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 SPECS Nexus check-in client starting...");

    let app = app::App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Full re-render of the check-in screen (the scanner modal lives on
/// <body> and is untouched by this)
#[cfg(target_arch = "wasm32")]
pub fn rerender_app() {
    APP.with(|cell| match cell.borrow().as_ref() {
        Some(app) => {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-rendering app: {:?}", e);
            }
        }
        None => log::warn!("⚠️ App not initialized yet"),
    });
}
