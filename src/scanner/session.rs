// ============================================================================
// SCAN SESSION - Session record and feedback types for the scanner
// ============================================================================

use crate::models::CheckInOutcome;

/// Default minimum gap before the same decoded value is accepted again.
pub const DEFAULT_COOLDOWN_MS: f64 = 3_000.0;

/// Default duration of the result overlay before scanning resumes.
pub const DEFAULT_OVERLAY_MS: u32 = 1_000;

/// Tunable scanner timings. The defaults are short enough for rapid
/// sequential scanning and long enough to absorb camera jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerConfig {
    pub cooldown_ms: f64,
    pub overlay_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            overlay_ms: DEFAULT_OVERLAY_MS,
        }
    }
}

/// One decode callback firing: the recognized text and when it arrived
/// (milliseconds, monotonic enough for cooldown math). Ephemeral, consumed
/// by the gate and discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanEvent {
    pub code: String,
    pub timestamp: f64,
}

impl ScanEvent {
    pub fn new(code: impl Into<String>, timestamp: f64) -> Self {
        Self {
            code: code.into(),
            timestamp,
        }
    }
}

/// Lifecycle phase of the scanning UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScannerPhase {
    /// No camera bound; the modal is not on screen
    Closed,
    /// Camera acquisition requested, engine not yet reading frames
    Starting,
    /// Engine reading frames, decode events accepted
    Scanning,
    /// One check-in request in flight; further decodes dropped
    Processing,
    /// Result overlay on screen; decodes dropped until it expires
    ShowingResult,
}

/// Mutable per-session record. Owned exclusively by the controller and
/// reset whenever the scanning UI is closed.
#[derive(Clone, Debug, Default)]
pub struct ScanSession {
    pub active: bool,
    pub last_code: Option<String>,
    pub last_timestamp: Option<f64>,
    pub processing: bool,
}

impl ScanSession {
    pub fn reset(&mut self) {
        self.active = false;
        self.last_code = None;
        self.last_timestamp = None;
        self.processing = false;
    }
}

/// Visual feedback shown over the camera preview after an attempt settles.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Success {
        student_name: String,
        student_number: String,
    },
    AlreadyCheckedIn {
        student_name: String,
        student_number: String,
    },
    Error {
        message: String,
    },
}

impl Overlay {
    pub fn from_outcome(outcome: &CheckInOutcome) -> Self {
        match outcome {
            CheckInOutcome::Success {
                student_name,
                student_number,
            } => Overlay::Success {
                student_name: student_name.clone(),
                student_number: student_number.clone(),
            },
            CheckInOutcome::AlreadyCheckedIn {
                student_name,
                student_number,
            } => Overlay::AlreadyCheckedIn {
                student_name: student_name.clone(),
                student_number: student_number.clone(),
            },
            CheckInOutcome::NotFound { message } | CheckInOutcome::NetworkError { message } => {
                Overlay::Error {
                    message: message.clone(),
                }
            }
        }
    }
}
