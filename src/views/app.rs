// ============================================================================
// APP VIEW - Officer check-in screen
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::event::NexusEvent;
use crate::state::AppState;
use crate::views::render_participant_list;

/// Render the check-in screen
pub fn render_app(
    state: &AppState,
    on_open_scanner: Rc<dyn Fn()>,
    on_refresh: Rc<dyn Fn()>,
) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("checkin-screen").build();

    // Without an operator session this screen cannot call the API
    if state.operator.borrow().is_none() {
        let notice = ElementBuilder::new("div")?
            .class("notice-card")
            .text("Sign in through the SPECS Nexus portal to use the check-in scanner.")
            .build();
        append_child(&screen, &notice)?;
        return Ok(screen);
    }

    // Header: event details + officer line
    let header = ElementBuilder::new("header")?.class("checkin-header").build();

    let event = state.event.borrow().clone();
    let title_text = event
        .as_ref()
        .map(|e| e.title.clone())
        .unwrap_or_else(|| "Loading event…".to_string());
    let title = ElementBuilder::new("h1")?.text(&title_text).build();
    append_child(&header, &title)?;

    if let Some(event) = &event {
        if let Some(line) = event_subtitle(event) {
            let subtitle = ElementBuilder::new("div")?
                .class("event-subtitle")
                .text(&line)
                .build();
            append_child(&header, &subtitle)?;
        }
    }

    if let Some(operator) = state.operator.borrow().as_ref() {
        let officer_line = match &operator.officer_position {
            Some(position) => format!("Officer: {} ({})", operator.officer_name, position),
            None => format!("Officer: {}", operator.officer_name),
        };
        let officer = ElementBuilder::new("div")?
            .class("officer-line")
            .text(&officer_line)
            .build();
        append_child(&header, &officer)?;
    }

    append_child(&screen, &header)?;

    // Attendance summary + actions
    let toolbar = ElementBuilder::new("div")?.class("checkin-toolbar").build();

    let total = state.roster.borrow().len();
    let checked_in = state.checked_in_count();
    let stats = ElementBuilder::new("div")?
        .class("attendance-stats")
        .text(&format!("{} / {} checked in", checked_in, total))
        .build();
    append_child(&toolbar, &stats)?;

    let scan_btn = ElementBuilder::new("button")?
        .class("btn-scan")
        .text("📷 Scan QR")
        .build();
    if event.is_none() {
        crate::dom::set_attribute(&scan_btn, "disabled", "disabled")?;
    }
    crate::dom::on_click(&scan_btn, move |_| {
        on_open_scanner();
    })?;
    append_child(&toolbar, &scan_btn)?;

    let refresh_btn = ElementBuilder::new("button")?
        .class("btn-refresh")
        .text("Refresh")
        .build();
    crate::dom::on_click(&refresh_btn, move |_| {
        on_refresh();
    })?;
    append_child(&toolbar, &refresh_btn)?;

    append_child(&screen, &toolbar)?;

    if let Some(error) = state.error.borrow().as_ref() {
        let banner = ElementBuilder::new("div")?
            .class("error-banner")
            .text(error)
            .build();
        append_child(&screen, &banner)?;
    }

    if *state.loading.borrow() {
        let loading = ElementBuilder::new("div")?
            .class("loading-note")
            .text("Loading…")
            .build();
        append_child(&screen, &loading)?;
    }

    let roster = state.roster.borrow();
    let list = render_participant_list(&roster)?;
    append_child(&screen, &list)?;

    Ok(screen)
}

fn event_subtitle(event: &NexusEvent) -> Option<String> {
    let when = event
        .starts_at
        .as_deref()
        .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
        .map(|t| t.format("%b %e, %Y %H:%M").to_string());

    match (&event.venue, when) {
        (Some(venue), Some(when)) => Some(format!("{} · {}", when, venue)),
        (Some(venue), None) => Some(venue.clone()),
        (None, Some(when)) => Some(when),
        (None, None) => None,
    }
}
