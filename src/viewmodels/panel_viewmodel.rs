// ============================================================================
// PANEL VIEWMODEL - Event header and roster loading
// ============================================================================

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::services::{auth_service, ApiClient};
use crate::state::AppState;

/// Loads the event context the check-in screen runs against.
#[derive(Clone)]
pub struct PanelViewModel {
    api: Rc<ApiClient>,
    event_id: u32,
}

impl PanelViewModel {
    pub fn new(api: Rc<ApiClient>, event_id: u32) -> Self {
        Self { api, event_id }
    }

    /// Initial load: event details plus the attendance roster
    pub fn load(&self, state: AppState) {
        let api = self.api.clone();
        let event_id = self.event_id;

        state.set_loading(true);
        state.set_error(None);

        spawn_local(async move {
            match api.fetch_event(event_id).await {
                Ok(event) => {
                    log::info!("✅ Event loaded: {}", event.title);
                    state.set_event(Some(event));
                }
                Err(e) => {
                    log::error!("❌ Error loading event {}: {}", event_id, e);
                    // A rejected token means the portal session expired; drop
                    // it so the screen falls back to the sign-in notice
                    if e.contains("401") {
                        log::warn!("⚠️ Session token rejected, clearing stored operator");
                        if let Err(clear_err) = auth_service::clear_operator() {
                            log::error!("❌ Error clearing operator session: {}", clear_err);
                        }
                        state.set_operator(None);
                    }
                    state.set_loading(false);
                    state.set_error(Some(format!("Could not load event: {}", e)));
                    return;
                }
            }

            match api.fetch_attendance(event_id).await {
                Ok(roster) => state.set_roster(roster),
                Err(e) => {
                    log::error!("❌ Error loading roster: {}", e);
                    state.set_error(Some(format!("Could not load roster: {}", e)));
                }
            }

            state.set_loading(false);
        });
    }

    /// Re-fetch only the roster (after check-ins settle)
    pub fn refresh_roster(&self, state: AppState) {
        let api = self.api.clone();
        let event_id = self.event_id;

        spawn_local(async move {
            match api.fetch_attendance(event_id).await {
                Ok(roster) => state.set_roster(roster),
                Err(e) => log::warn!("⚠️ Roster refresh failed: {}", e),
            }
        });
    }
}
