// ============================================================================
// SCANNER CONTROLLER - Check-in scanning state machine
// ============================================================================
// Pure state machine, no camera or network access. The view-model layer
// feeds it decode events and settled outcomes and acts on its decisions,
// so the whole policy is testable without a browser.
// ============================================================================

use crate::models::CheckInOutcome;
use crate::scanner::session::{Overlay, ScanEvent, ScanSession, ScannerConfig, ScannerPhase};

/// What to do with one decode event.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeDecision {
    /// Dispatch a check-in request for this (trimmed) code
    Dispatch { code: String },
    /// Drop the event; scanning continues untouched
    Drop(DropReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Not in the Scanning phase (closed, starting up, or showing a result)
    NotScanning,
    /// Decoded text was empty after trimming
    Empty,
    /// Same code as the last processed one, inside the cooldown window
    Cooldown,
    /// A check-in request is already in flight
    InFlight,
}

/// Drives the scanning UI lifecycle: camera acquisition, decode gating,
/// request dispatch, result overlay, teardown.
///
/// Decode events are drop-latest-wins: anything arriving while a request
/// is in flight or an overlay is up is discarded, never queued. The
/// operator just keeps holding the badge in frame.
pub struct ScannerController {
    config: ScannerConfig,
    phase: ScannerPhase,
    session: ScanSession,
    overlay: Option<Overlay>,
    success_count: u32,
    /// Bumped on every close; completions carrying an older generation
    /// arrived after teardown and must not touch state.
    generation: u64,
}

impl ScannerController {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            phase: ScannerPhase::Closed,
            session: ScanSession::default(),
            overlay: None,
            success_count: 0,
            generation: 0,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn phase(&self) -> ScannerPhase {
        self.phase
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn success_count(&self) -> u32 {
        self.success_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin camera acquisition. Only valid from `Closed`; the caller must
    /// tear down any previous session first (the camera is exclusive).
    /// Returns the generation that tags this session's completions.
    pub fn open(&mut self) -> Result<u64, String> {
        if self.phase != ScannerPhase::Closed {
            return Err(format!("scanner already open (phase {:?})", self.phase));
        }
        self.phase = ScannerPhase::Starting;
        self.session.active = true;
        Ok(self.generation)
    }

    /// The decoder engine confirmed it is reading frames.
    pub fn engine_ready(&mut self) {
        if self.phase == ScannerPhase::Starting {
            self.phase = ScannerPhase::Scanning;
            log::info!("📷 Scanner ready, accepting decode events");
        }
    }

    /// Camera acquisition failed (permission denied, device busy). Terminal
    /// for this session; the UI surfaces a retry button, never auto-retries.
    pub fn engine_failed(&mut self) {
        if self.phase == ScannerPhase::Starting {
            self.phase = ScannerPhase::Closed;
            self.session.reset();
            self.overlay = None;
            self.success_count = 0;
        }
    }

    /// Gate one decode event. All three conditions must hold for dispatch:
    /// non-empty after trimming, not the last processed code inside the
    /// cooldown window, and no request already in flight.
    pub fn handle_decode(&mut self, event: ScanEvent) -> DecodeDecision {
        if self.session.processing {
            return DecodeDecision::Drop(DropReason::InFlight);
        }
        if self.phase != ScannerPhase::Scanning {
            return DecodeDecision::Drop(DropReason::NotScanning);
        }

        let code = event.code.trim();
        if code.is_empty() {
            return DecodeDecision::Drop(DropReason::Empty);
        }

        if let (Some(last), Some(ts)) = (&self.session.last_code, self.session.last_timestamp) {
            if last == code && event.timestamp - ts < self.config.cooldown_ms {
                return DecodeDecision::Drop(DropReason::Cooldown);
            }
        }

        self.session.processing = true;
        self.phase = ScannerPhase::Processing;
        DecodeDecision::Dispatch {
            code: code.to_string(),
        }
    }

    /// Apply a settled check-in attempt. The code and timestamp are recorded
    /// as last-processed for every outcome, so even a failed attempt starts
    /// a cooldown. Returns false when the completion is stale (session was
    /// closed, or closed and reopened, while the request was in flight).
    pub fn complete_check_in(
        &mut self,
        code: &str,
        outcome: &CheckInOutcome,
        now_ms: f64,
        generation: u64,
    ) -> bool {
        if generation != self.generation || self.phase != ScannerPhase::Processing {
            return false;
        }

        self.session.last_code = Some(code.to_string());
        self.session.last_timestamp = Some(now_ms);
        self.session.processing = false;

        if outcome.is_success() {
            self.success_count += 1;
        }

        self.overlay = Some(Overlay::from_outcome(outcome));
        self.phase = ScannerPhase::ShowingResult;
        true
    }

    /// The overlay timer fired: clear the overlay and resume scanning.
    /// Stale timers (from a session closed in the meantime) are ignored.
    pub fn overlay_elapsed(&mut self, generation: u64) {
        if generation == self.generation && self.phase == ScannerPhase::ShowingResult {
            self.overlay = None;
            self.phase = ScannerPhase::Scanning;
        }
    }

    /// Tear down the session. Safe from any phase, including `Closed`;
    /// resets every piece of session state and invalidates in-flight
    /// completions and pending overlay timers via the generation bump.
    pub fn close(&mut self) {
        self.phase = ScannerPhase::Closed;
        self.session.reset();
        self.overlay = None;
        self.success_count = 0;
        self.generation += 1;
    }
}

impl Default for ScannerController {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_for(number: &str) -> CheckInOutcome {
        CheckInOutcome::Success {
            student_name: "Juan Dela Cruz".to_string(),
            student_number: number.to_string(),
        }
    }

    fn already_for(number: &str) -> CheckInOutcome {
        CheckInOutcome::AlreadyCheckedIn {
            student_name: "Juan Dela Cruz".to_string(),
            student_number: number.to_string(),
        }
    }

    /// Open and bring the engine up, returning the session generation.
    fn scanning_controller() -> (ScannerController, u64) {
        let mut controller = ScannerController::default();
        let generation = controller.open().unwrap();
        controller.engine_ready();
        assert_eq!(controller.phase(), ScannerPhase::Scanning);
        (controller, generation)
    }

    /// Feed one decode event at a given time.
    fn decode(controller: &mut ScannerController, code: &str, at_ms: f64) -> DecodeDecision {
        controller.handle_decode(ScanEvent::new(code, at_ms))
    }

    /// Run one full scan through dispatch, completion, and overlay expiry.
    fn scan_round(
        controller: &mut ScannerController,
        generation: u64,
        code: &str,
        outcome: CheckInOutcome,
        at_ms: f64,
    ) {
        match controller.handle_decode(ScanEvent::new(code, at_ms)) {
            DecodeDecision::Dispatch { code: dispatched } => {
                assert!(controller.complete_check_in(&dispatched, &outcome, at_ms, generation));
                controller.overlay_elapsed(generation);
            }
            other => panic!("expected dispatch for {}, got {:?}", code, other),
        }
    }

    #[test]
    fn duplicate_inside_cooldown_is_dropped() {
        let (mut controller, generation) = scanning_controller();

        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            success_for("2021-00001"),
            0.0,
        );
        assert_eq!(
            decode(&mut controller, "2021-00001", 1_000.0),
            DecodeDecision::Drop(DropReason::Cooldown)
        );
        assert_eq!(controller.success_count(), 1);
    }

    #[test]
    fn duplicate_is_dropped_even_after_a_failed_attempt() {
        let (mut controller, generation) = scanning_controller();

        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            CheckInOutcome::NetworkError {
                message: "timeout".to_string(),
            },
            0.0,
        );
        // Cooldown applies regardless of the first attempt's outcome
        assert_eq!(
            decode(&mut controller, "2021-00001", 500.0),
            DecodeDecision::Drop(DropReason::Cooldown)
        );
    }

    #[test]
    fn same_code_is_accepted_after_cooldown_expires() {
        let (mut controller, generation) = scanning_controller();

        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            success_for("2021-00001"),
            0.0,
        );
        assert!(matches!(
            decode(&mut controller, "2021-00001", 3_000.0),
            DecodeDecision::Dispatch { .. }
        ));
    }

    #[test]
    fn different_code_is_dropped_while_request_in_flight() {
        let (mut controller, _generation) = scanning_controller();

        assert!(matches!(
            decode(&mut controller, "2021-00001", 0.0),
            DecodeDecision::Dispatch { .. }
        ));
        assert_eq!(controller.phase(), ScannerPhase::Processing);

        // Decodes keep firing at frame rate while the request is pending
        assert_eq!(
            decode(&mut controller, "2021-00002", 50.0),
            DecodeDecision::Drop(DropReason::InFlight)
        );
        assert_eq!(
            decode(&mut controller, "2021-00003", 120.0),
            DecodeDecision::Drop(DropReason::InFlight)
        );
    }

    #[test]
    fn decodes_are_dropped_while_overlay_is_showing() {
        let (mut controller, generation) = scanning_controller();

        let decision = decode(&mut controller, "2021-00001", 0.0);
        assert!(matches!(decision, DecodeDecision::Dispatch { .. }));
        assert!(controller.complete_check_in(
            "2021-00001",
            &success_for("2021-00001"),
            200.0,
            generation
        ));
        assert_eq!(controller.phase(), ScannerPhase::ShowingResult);

        assert_eq!(
            decode(&mut controller, "2021-00002", 300.0),
            DecodeDecision::Drop(DropReason::NotScanning)
        );

        controller.overlay_elapsed(generation);
        assert_eq!(controller.phase(), ScannerPhase::Scanning);
        assert!(matches!(
            decode(&mut controller, "2021-00002", 1_300.0),
            DecodeDecision::Dispatch { .. }
        ));
    }

    #[test]
    fn empty_and_whitespace_codes_are_dropped() {
        let (mut controller, _generation) = scanning_controller();

        assert_eq!(
            decode(&mut controller, "", 0.0),
            DecodeDecision::Drop(DropReason::Empty)
        );
        assert_eq!(
            decode(&mut controller, "   \n", 10.0),
            DecodeDecision::Drop(DropReason::Empty)
        );
        assert_eq!(controller.phase(), ScannerPhase::Scanning);
    }

    #[test]
    fn decoded_text_is_trimmed_before_dispatch() {
        let (mut controller, _generation) = scanning_controller();

        match decode(&mut controller, "  2021-00001  ", 0.0) {
            DecodeDecision::Dispatch { code } => assert_eq!(code, "2021-00001"),
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn close_is_idempotent_from_any_phase() {
        let mut controller = ScannerController::default();

        // Closed, twice in a row
        controller.close();
        controller.close();
        assert_eq!(controller.phase(), ScannerPhase::Closed);

        // Mid-processing
        let generation = controller.open().unwrap();
        controller.engine_ready();
        assert!(matches!(
            decode(&mut controller, "2021-00001", 0.0),
            DecodeDecision::Dispatch { .. }
        ));
        controller.close();
        controller.close();
        assert_eq!(controller.phase(), ScannerPhase::Closed);
        assert_eq!(controller.success_count(), 0);

        // The generation moved on, so the in-flight completion is discarded
        assert!(!controller.complete_check_in(
            "2021-00001",
            &success_for("2021-00001"),
            500.0,
            generation
        ));
        assert_eq!(controller.phase(), ScannerPhase::Closed);
    }

    #[test]
    fn late_completion_after_reopen_is_discarded() {
        let mut controller = ScannerController::default();
        let first_generation = controller.open().unwrap();
        controller.engine_ready();
        assert!(matches!(
            decode(&mut controller, "2021-00001", 0.0),
            DecodeDecision::Dispatch { .. }
        ));

        // Close while the request is in flight, then reopen
        controller.close();
        let second_generation = controller.open().unwrap();
        controller.engine_ready();
        assert_ne!(first_generation, second_generation);

        // The old response lands in the fresh session and must not apply
        assert!(!controller.complete_check_in(
            "2021-00001",
            &success_for("2021-00001"),
            900.0,
            first_generation
        ));
        assert_eq!(controller.phase(), ScannerPhase::Scanning);
        assert_eq!(controller.success_count(), 0);
        assert!(controller.overlay().is_none());
    }

    #[test]
    fn outcomes_map_to_overlays_and_counter() {
        let (mut controller, generation) = scanning_controller();

        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            success_for("2021-00001"),
            0.0,
        );
        assert_eq!(controller.success_count(), 1);

        // AlreadyCheckedIn: distinct overlay, counter unchanged
        match decode(&mut controller, "2021-00002", 4_000.0) {
            DecodeDecision::Dispatch { code } => {
                controller.complete_check_in(&code, &already_for("2021-00002"), 4_100.0, generation);
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(matches!(
            controller.overlay(),
            Some(Overlay::AlreadyCheckedIn { .. })
        ));
        assert_eq!(controller.success_count(), 1);
        controller.overlay_elapsed(generation);

        // NotFound and NetworkError: error overlay, counter unchanged
        match decode(&mut controller, "bad-code", 8_000.0) {
            DecodeDecision::Dispatch { code } => {
                controller.complete_check_in(
                    &code,
                    &CheckInOutcome::NotFound {
                        message: "Student not registered for this event".to_string(),
                    },
                    8_100.0,
                    generation,
                );
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(matches!(controller.overlay(), Some(Overlay::Error { .. })));
        assert_eq!(controller.success_count(), 1);
        controller.overlay_elapsed(generation);

        match decode(&mut controller, "2021-00003", 12_000.0) {
            DecodeDecision::Dispatch { code } => {
                controller.complete_check_in(
                    &code,
                    &CheckInOutcome::NetworkError {
                        message: "Network error: timeout".to_string(),
                    },
                    12_100.0,
                    generation,
                );
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(matches!(controller.overlay(), Some(Overlay::Error { .. })));
        assert_eq!(controller.success_count(), 1);
    }

    #[test]
    fn rescan_sequence_success_then_cooldown_then_already() {
        let (mut controller, generation) = scanning_controller();

        // t=0: fresh scan succeeds, counter becomes 1
        match decode(&mut controller, "2021-00001", 0.0) {
            DecodeDecision::Dispatch { code } => {
                assert!(controller.complete_check_in(
                    &code,
                    &success_for("2021-00001"),
                    100.0,
                    generation
                ));
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert_eq!(controller.success_count(), 1);
        controller.overlay_elapsed(generation);

        // t=1000ms: inside the 3000ms window, dropped, counter stays 1
        assert_eq!(
            decode(&mut controller, "2021-00001", 1_000.0),
            DecodeDecision::Drop(DropReason::Cooldown)
        );
        assert_eq!(controller.success_count(), 1);

        // t=3500ms: past the window, dispatched again; the backend now
        // reports already checked in, counter stays 1
        match decode(&mut controller, "2021-00001", 3_500.0) {
            DecodeDecision::Dispatch { code } => {
                assert!(controller.complete_check_in(
                    &code,
                    &already_for("2021-00001"),
                    3_600.0,
                    generation
                ));
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(matches!(
            controller.overlay(),
            Some(Overlay::AlreadyCheckedIn { .. })
        ));
        assert_eq!(controller.success_count(), 1);
    }

    #[test]
    fn unknown_code_shows_error_then_scanning_resumes() {
        let (mut controller, generation) = scanning_controller();

        match decode(&mut controller, "bad-code", 0.0) {
            DecodeDecision::Dispatch { code } => {
                assert!(controller.complete_check_in(
                    &code,
                    &CheckInOutcome::NotFound {
                        message: "Student not found".to_string(),
                    },
                    100.0,
                    generation,
                ));
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(matches!(controller.overlay(), Some(Overlay::Error { .. })));

        // Overlay expiry brings the session back without any manual step
        controller.overlay_elapsed(generation);
        assert_eq!(controller.phase(), ScannerPhase::Scanning);
        assert!(controller.overlay().is_none());
        assert!(matches!(
            decode(&mut controller, "2021-00004", 2_000.0),
            DecodeDecision::Dispatch { .. }
        ));
    }

    #[test]
    fn open_is_rejected_while_session_is_live() {
        let mut controller = ScannerController::default();
        controller.open().unwrap();
        assert!(controller.open().is_err());
    }

    #[test]
    fn engine_failure_returns_to_closed_without_scanning() {
        let mut controller = ScannerController::default();
        controller.open().unwrap();
        controller.engine_failed();
        assert_eq!(controller.phase(), ScannerPhase::Closed);

        // No decodes accepted before a successful reopen
        assert_eq!(
            decode(&mut controller, "2021-00001", 0.0),
            DecodeDecision::Drop(DropReason::NotScanning)
        );
        assert!(controller.open().is_ok());
    }

    #[test]
    fn decodes_before_engine_ready_are_dropped() {
        let mut controller = ScannerController::default();
        controller.open().unwrap();
        assert_eq!(controller.phase(), ScannerPhase::Starting);
        assert_eq!(
            decode(&mut controller, "2021-00001", 0.0),
            DecodeDecision::Drop(DropReason::NotScanning)
        );
    }

    #[test]
    fn custom_cooldown_window_is_respected() {
        let mut controller = ScannerController::new(ScannerConfig {
            cooldown_ms: 500.0,
            overlay_ms: 200,
        });
        let generation = controller.open().unwrap();
        controller.engine_ready();

        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            success_for("2021-00001"),
            0.0,
        );
        assert_eq!(
            decode(&mut controller, "2021-00001", 400.0),
            DecodeDecision::Drop(DropReason::Cooldown)
        );
        assert!(matches!(
            decode(&mut controller, "2021-00001", 500.0),
            DecodeDecision::Dispatch { .. }
        ));
    }

    #[test]
    fn stale_overlay_timer_does_not_disturb_new_session() {
        let mut controller = ScannerController::default();
        let first_generation = controller.open().unwrap();
        controller.engine_ready();

        controller.close();
        let second_generation = controller.open().unwrap();
        controller.engine_ready();

        // A timer scheduled before close fires into the new session
        controller.overlay_elapsed(first_generation);
        assert_eq!(controller.phase(), ScannerPhase::Scanning);

        let _ = second_generation;
    }

    #[test]
    fn close_resets_counter_and_session_record() {
        let (mut controller, generation) = scanning_controller();
        scan_round(
            &mut controller,
            generation,
            "2021-00001",
            success_for("2021-00001"),
            0.0,
        );
        assert_eq!(controller.success_count(), 1);

        controller.close();
        assert_eq!(controller.success_count(), 0);
        assert!(controller.overlay().is_none());
        assert!(!controller.session().active);
        assert!(controller.session().last_code.is_none());
        assert!(controller.session().last_timestamp.is_none());
        assert!(!controller.session().processing);

        // A fresh session accepts the same code immediately
        let generation = controller.open().unwrap();
        controller.engine_ready();
        assert!(matches!(
            decode(&mut controller, "2021-00001", 10.0),
            DecodeDecision::Dispatch { .. }
        ));
        let _ = generation;
    }
}
