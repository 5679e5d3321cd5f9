// ============================================================================
// SCANNER - Camera check-in session: state machine + decoder engine boundary
// ============================================================================

pub mod controller;
pub mod engine;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod qr_ffi;

pub use controller::{DecodeDecision, DropReason, ScannerController};
pub use engine::{DecoderEngine, EngineConfig, EngineHandlers};
pub use session::{Overlay, ScanEvent, ScanSession, ScannerConfig, ScannerPhase};
