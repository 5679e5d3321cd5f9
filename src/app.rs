// ============================================================================
// APP - Root of the check-in screen
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::models::CheckInOutcome;
use crate::scanner::qr_ffi::JsQrEngine;
use crate::services::{auth_service, ApiClient};
use crate::state::AppState;
use crate::viewmodels::{PanelViewModel, ScannerViewModel};
use crate::views::{render_app, scanner_modal};

pub struct App {
    state: AppState,
    root: Element,
    /// Built lazily on first scan, then reused across open/close cycles
    scanner: Rc<RefCell<Option<ScannerViewModel>>>,
    panel: Option<PanelViewModel>,
    api: Option<Rc<ApiClient>>,
    event_id: Option<u32>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Operator session comes from the portal shell via localStorage
        let operator = auth_service::load_operator();
        if operator.is_none() {
            log::warn!("⚠️ No operator session in storage, portal login required");
        }
        *state.operator.borrow_mut() = operator.clone();

        // The host supplies the event context through the URL
        let event_id = current_event_id();
        if event_id.is_none() {
            log::warn!("⚠️ No event id in the URL, open this screen from an event page");
        }

        let api = operator
            .as_ref()
            .map(|op| Rc::new(ApiClient::new(&op.token)));

        let panel = match (&api, event_id) {
            (Some(api), Some(event_id)) => Some(PanelViewModel::new(api.clone(), event_id)),
            _ => None,
        };

        if let Some(panel) = &panel {
            panel.load(state.clone());
        }

        // Re-render on state changes, batched through a zero-delay timeout
        state.subscribe_to_changes(move || {
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            state,
            root,
            scanner: Rc::new(RefCell::new(None)),
            panel,
            api,
            event_id,
        })
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let on_open_scanner: Rc<dyn Fn()> = {
            let scanner = self.scanner.clone();
            let api = self.api.clone();
            let event_id = self.event_id;
            let panel = self.panel.clone();
            let state = self.state.clone();
            Rc::new(move || {
                let (Some(api), Some(event_id)) = (api.clone(), event_id) else {
                    return;
                };

                if scanner.borrow().is_none() {
                    let panel = panel.clone();
                    let state = state.clone();
                    let on_result: Rc<dyn Fn(CheckInOutcome)> = Rc::new(move |_outcome| {
                        // Dependent UI refresh: the roster re-fetches after
                        // every settled attempt
                        if let Some(panel) = &panel {
                            panel.refresh_roster(state.clone());
                        }
                    });

                    let engine = Box::new(JsQrEngine::new(scanner_modal::QR_VIEWPORT_ID));
                    *scanner.borrow_mut() =
                        Some(ScannerViewModel::new(api, event_id, engine, on_result));
                }

                if let Some(vm) = scanner.borrow().as_ref() {
                    if let Err(e) = vm.open() {
                        log::error!("❌ Error opening scanner: {:?}", e);
                    }
                }
            })
        };

        let on_refresh: Rc<dyn Fn()> = {
            let panel = self.panel.clone();
            let state = self.state.clone();
            Rc::new(move || {
                if let Some(panel) = &panel {
                    panel.refresh_roster(state.clone());
                }
            })
        };

        let screen = render_app(&self.state, on_open_scanner, on_refresh)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &screen)?;

        Ok(())
    }
}

/// Event id from the `event` query parameter
fn current_event_id() -> Option<u32> {
    let search = crate::dom::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("event")?.parse().ok()
}
