// ============================================================================
// DECODER ENGINE - Boundary to the camera QR decoding collaborator
// ============================================================================

use std::rc::Rc;

/// Camera and detection settings handed to the engine on start.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Camera facing mode, "environment" for the rear camera
    pub facing_mode: String,
    /// Target decode attempts per second
    pub fps: u32,
    /// Side length in pixels of the square detection region
    pub detection_box: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            facing_mode: "environment".to_string(),
            fps: 10,
            detection_box: 250,
        }
    }
}

/// Callbacks the engine fires while running. `on_decode` fires once per
/// frame in which a code was recognized; `on_error` only for fatal
/// acquisition failures (frames without a code are not reported);
/// `on_ready` once the camera stream is live.
pub struct EngineHandlers {
    pub on_decode: Rc<dyn Fn(String)>,
    pub on_error: Rc<dyn Fn(String)>,
    pub on_ready: Rc<dyn Fn()>,
}

/// A camera-backed code decoder. One instance may hold the camera at a
/// time; `stop` is best-effort and must tolerate an engine that is
/// already stopped or in a broken internal state.
pub trait DecoderEngine {
    fn start(&mut self, config: &EngineConfig, handlers: EngineHandlers) -> Result<(), String>;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}
