// ============================================================================
// SCANNER VIEWMODEL - Binds the controller to camera, network, and DOM
// ============================================================================
// The controller decides, this layer acts: it mounts the modal, runs the
// decoder engine, dispatches check-in requests, and schedules the overlay
// dismissal timer. All policy (dedup, cooldown, in-flight gating) stays in
// the controller.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::append_to_body;
use crate::models::CheckInOutcome;
use crate::scanner::{
    DecodeDecision, DecoderEngine, EngineConfig, EngineHandlers, ScanEvent, ScannerController,
    ScannerPhase,
};
use crate::services::ApiClient;
use crate::views::scanner_modal;

/// Delay before binding the camera, so the freshly mounted viewport has
/// finished layout
const ENGINE_START_DELAY_MS: u32 = 100;

#[derive(Clone)]
pub struct ScannerViewModel {
    controller: Rc<RefCell<ScannerController>>,
    engine: Rc<RefCell<Box<dyn DecoderEngine>>>,
    api: Rc<ApiClient>,
    event_id: u32,
    /// Pending overlay dismissal; dropping the handle cancels it
    overlay_timer: Rc<RefCell<Option<Timeout>>>,
    /// Host notification, fired once per settled check-in attempt
    on_result: Rc<dyn Fn(CheckInOutcome)>,
}

impl ScannerViewModel {
    pub fn new(
        api: Rc<ApiClient>,
        event_id: u32,
        engine: Box<dyn DecoderEngine>,
        on_result: Rc<dyn Fn(CheckInOutcome)>,
    ) -> Self {
        Self {
            controller: Rc::new(RefCell::new(ScannerController::default())),
            engine: Rc::new(RefCell::new(engine)),
            api,
            event_id,
            overlay_timer: Rc::new(RefCell::new(None)),
            on_result,
        }
    }

    /// Mount the scanner modal and begin camera acquisition. The camera is
    /// exclusive, so an already-open session is torn down first.
    pub fn open(&self) -> Result<(), JsValue> {
        if self.controller.borrow().phase() != ScannerPhase::Closed {
            self.close();
        }

        let on_close: Rc<dyn Fn()> = {
            let vm = self.clone();
            Rc::new(move || vm.close())
        };
        let on_manual_submit: Rc<dyn Fn(String)> = {
            let vm = self.clone();
            Rc::new(move |code: String| vm.handle_decode(code))
        };
        let on_retry: Rc<dyn Fn()> = {
            let vm = self.clone();
            Rc::new(move || {
                if let Err(e) = vm.start_session() {
                    log::error!("❌ Scanner retry failed: {:?}", e);
                }
            })
        };

        let modal = scanner_modal::render_scanner_modal(on_close, on_manual_submit, on_retry)?;
        append_to_body(&modal)?;

        self.start_session()
    }

    /// Begin (or retry) camera acquisition for the mounted modal
    fn start_session(&self) -> Result<(), JsValue> {
        scanner_modal::hide_camera_error();
        self.controller
            .borrow_mut()
            .open()
            .map_err(|e| JsValue::from_str(&e))?;
        scanner_modal::set_counter(0);

        let vm = self.clone();
        Timeout::new(ENGINE_START_DELAY_MS, move || {
            // The operator may have closed the modal before this fired
            if vm.controller.borrow().phase() != ScannerPhase::Starting {
                return;
            }
            vm.start_engine();
        })
        .forget();

        Ok(())
    }

    fn start_engine(&self) {
        log::info!("📷 Starting QR decoder engine...");

        let handlers = EngineHandlers {
            on_decode: {
                let vm = self.clone();
                Rc::new(move |text: String| vm.handle_decode(text))
            },
            on_error: {
                let vm = self.clone();
                Rc::new(move |message: String| vm.handle_engine_error(message))
            },
            on_ready: {
                let vm = self.clone();
                Rc::new(move || {
                    log::info!("✅ QR decoder engine ready");
                    vm.controller.borrow_mut().engine_ready();
                })
            },
        };

        let config = EngineConfig::default();
        if let Err(e) = self.engine.borrow_mut().start(&config, handlers) {
            log::error!("❌ Camera acquisition failed: {}", e);
            self.controller.borrow_mut().engine_failed();
            scanner_modal::show_camera_error();
        }
    }

    fn handle_engine_error(&self, message: String) {
        let starting = self.controller.borrow().phase() == ScannerPhase::Starting;
        if starting {
            // Terminal for this session: surface the retry button, never
            // re-prompt for camera permission automatically
            log::error!("❌ Camera acquisition failed: {}", message);
            self.controller.borrow_mut().engine_failed();
            scanner_modal::show_camera_error();
        } else {
            log::warn!("⚠️ Decoder engine reported: {}", message);
        }
    }

    /// One decode event, from the camera or the manual entry field
    pub fn handle_decode(&self, raw: String) {
        let event = ScanEvent::new(raw, js_sys::Date::now());
        let decision = self.controller.borrow_mut().handle_decode(event);

        match decision {
            DecodeDecision::Dispatch { code } => {
                let generation = self.controller.borrow().generation();
                log::info!("📱 Code accepted: {}", code);

                let vm = self.clone();
                spawn_local(async move {
                    let outcome = vm.api.check_in(vm.event_id, &code).await;
                    vm.finish(code, outcome, generation);
                });
            }
            DecodeDecision::Drop(reason) => {
                // Dropped events are normal at camera frame rate
                log::debug!("Decode dropped: {:?}", reason);
            }
        }
    }

    /// Apply a settled check-in attempt and schedule the overlay dismissal
    fn finish(&self, code: String, outcome: CheckInOutcome, generation: u64) {
        let now = js_sys::Date::now();
        let applied =
            self.controller
                .borrow_mut()
                .complete_check_in(&code, &outcome, now, generation);
        if !applied {
            // The session was closed (or reopened) while the request was
            // in flight
            log::info!("ℹ️ Stale check-in response for {} ignored", code);
            return;
        }

        {
            let controller = self.controller.borrow();
            if let Some(overlay) = controller.overlay() {
                if let Err(e) = scanner_modal::show_feedback(overlay) {
                    log::error!("❌ Error rendering scan feedback: {:?}", e);
                }
            }
            scanner_modal::set_counter(controller.success_count());
        }

        (self.on_result)(outcome);

        let overlay_ms = self.controller.borrow().config().overlay_ms;
        let vm = self.clone();
        let timer = Timeout::new(overlay_ms, move || {
            vm.controller.borrow_mut().overlay_elapsed(generation);
            scanner_modal::clear_feedback();
            vm.overlay_timer.borrow_mut().take();
        });
        // Replacing the handle drops (and thereby cancels) any previous timer
        *self.overlay_timer.borrow_mut() = Some(timer);
    }

    /// Tear down the session: cancel the overlay timer, release the camera,
    /// reset the controller, unmount the modal. Safe to call repeatedly.
    pub fn close(&self) {
        if let Some(timer) = self.overlay_timer.borrow_mut().take() {
            drop(timer);
        }

        // Engine stop is best-effort; a stopped or broken engine must not
        // block the close
        self.engine.borrow_mut().stop();
        self.controller.borrow_mut().close();
        scanner_modal::remove_scanner_modal();
        log::info!("👋 Scanner closed");
    }
}
