// ============================================================================
// QR SCANNER FFI - Foreign Function Interface to the JavaScript glue
// ============================================================================
// Wrappers over qr_scanner.js. Stateless, no logic here.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::scanner::engine::{DecoderEngine, EngineConfig, EngineHandlers};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = initQrScanner)]
    fn init_qr_scanner(
        container_id: &str,
        facing_mode: &str,
        fps: u32,
        detection_box: u32,
        on_decode: &js_sys::Function,
        on_error: &js_sys::Function,
        on_ready: &js_sys::Function,
    );

    // The JS side throws when the engine was never started or the camera
    // stream already died; `catch` turns that into a Result we can drop.
    #[wasm_bindgen(catch, js_name = stopQrScanner)]
    fn stop_qr_scanner() -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = isQrScannerRunning)]
    fn is_qr_scanner_running() -> bool;
}

/// Decoder engine backed by the JS QR library, bound to a viewport
/// container by element id.
pub struct JsQrEngine {
    container_id: String,
}

impl JsQrEngine {
    pub fn new(container_id: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
        }
    }
}

impl DecoderEngine for JsQrEngine {
    fn start(&mut self, config: &EngineConfig, handlers: EngineHandlers) -> Result<(), String> {
        // The camera is exclusive; rebinding without a stop would leave the
        // old stream holding the device
        if self.is_running() {
            self.stop();
        }

        let on_decode = handlers.on_decode;
        let decode_closure = Closure::wrap(Box::new(move |value: JsValue| {
            if let Some(text) = value.as_string() {
                on_decode(text);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let on_error = handlers.on_error;
        let error_closure = Closure::wrap(Box::new(move |value: JsValue| {
            let message = value
                .as_string()
                .unwrap_or_else(|| "camera unavailable".to_string());
            on_error(message);
        }) as Box<dyn FnMut(JsValue)>);

        let on_ready = handlers.on_ready;
        let ready_closure = Closure::wrap(Box::new(move |_value: JsValue| {
            on_ready();
        }) as Box<dyn FnMut(JsValue)>);

        init_qr_scanner(
            &self.container_id,
            &config.facing_mode,
            config.fps,
            config.detection_box,
            decode_closure.as_ref().unchecked_ref(),
            error_closure.as_ref().unchecked_ref(),
            ready_closure.as_ref().unchecked_ref(),
        );

        // The JS glue holds these for the lifetime of the page
        decode_closure.forget();
        error_closure.forget();
        ready_closure.forget();

        Ok(())
    }

    fn stop(&mut self) {
        // Best-effort: stopping an already-stopped engine is fine
        if let Err(e) = stop_qr_scanner() {
            log::debug!("qr engine stop ignored: {:?}", e);
        }
    }

    fn is_running(&self) -> bool {
        is_qr_scanner_running()
    }
}
