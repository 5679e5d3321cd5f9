// ============================================================================
// SCANNER MODAL - Camera viewport, result overlay, counter, manual entry
// ============================================================================
// The modal mounts on <body> so panel re-renders never tear down the live
// camera viewport. Feedback updates go straight to the mounted elements.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    add_class, append_child, get_element_by_id, on_click, on_keydown, remove_class,
    set_class_name, set_inner_html, set_text_content, ElementBuilder,
};
use crate::scanner::Overlay;

pub const SCANNER_MODAL_ID: &str = "checkin-scanner-modal";
/// Container the decoder engine binds the camera stream to
pub const QR_VIEWPORT_ID: &str = "qr-viewport";
const FEEDBACK_ID: &str = "scan-feedback";
const COUNTER_ID: &str = "scan-counter";
const CAMERA_ERROR_ID: &str = "scanner-camera-error";
const MANUAL_INPUT_ID: &str = "manual-student-number";

/// Render the scanner modal
pub fn render_scanner_modal(
    on_close: Rc<dyn Fn()>,
    on_manual_submit: Rc<dyn Fn(String)>,
    on_retry: Rc<dyn Fn()>,
) -> Result<Element, JsValue> {
    let modal = ElementBuilder::new("div")?
        .id(SCANNER_MODAL_ID)?
        .class("scanner-modal active")
        .build();

    // Overlay closes on click
    let overlay = ElementBuilder::new("div")?.class("scanner-overlay").build();
    {
        let on_close = on_close.clone();
        on_click(&overlay, move |_| {
            on_close();
        })?;
    }
    append_child(&modal, &overlay)?;

    let content = ElementBuilder::new("div")?.class("scanner-content").build();

    // Clicks inside the content must not close the modal
    on_click(&content, |e| {
        e.stop_propagation();
    })?;

    // Header: title, session counter, close button
    let header = ElementBuilder::new("div")?.class("scanner-header").build();
    let title = ElementBuilder::new("h2")?.text("Scan Attendance").build();
    let counter = ElementBuilder::new("span")?
        .id(COUNTER_ID)?
        .class("scan-counter")
        .text("0 checked in")
        .build();
    let close_btn = ElementBuilder::new("button")?
        .class("btn-close")
        .text("✕")
        .build();
    {
        let on_close = on_close.clone();
        on_click(&close_btn, move |_| {
            on_close();
        })?;
    }
    append_child(&header, &title)?;
    append_child(&header, &counter)?;
    append_child(&header, &close_btn)?;
    append_child(&content, &header)?;

    // Camera viewport (the decoder engine renders the stream in here)
    let viewport = ElementBuilder::new("div")?
        .id(QR_VIEWPORT_ID)?
        .class("scanner-viewport")
        .build();
    append_child(&content, &viewport)?;

    // Camera failure notice with an explicit retry; hidden unless
    // acquisition fails
    let camera_error = ElementBuilder::new("div")?
        .id(CAMERA_ERROR_ID)?
        .class("scanner-camera-error hidden")
        .build();
    let error_text = ElementBuilder::new("p")?
        .text("Camera unavailable. Check permissions and try again.")
        .build();
    let retry_btn = ElementBuilder::new("button")?
        .class("btn-retry")
        .text("Retry camera")
        .build();
    on_click(&retry_btn, move |_| {
        on_retry();
    })?;
    append_child(&camera_error, &error_text)?;
    append_child(&camera_error, &retry_btn)?;
    append_child(&content, &camera_error)?;

    // Scan feedback (hidden until an attempt settles)
    let feedback = ElementBuilder::new("div")?
        .id(FEEDBACK_ID)?
        .class("scan-result hidden")
        .build();
    append_child(&content, &feedback)?;

    // Manual entry for badges the camera cannot read; goes through the
    // same gate as camera decodes
    let manual = ElementBuilder::new("div")?.class("manual-entry").build();
    let manual_input = ElementBuilder::new("input")?
        .id(MANUAL_INPUT_ID)?
        .attr("type", "text")?
        .attr("placeholder", "Student number, e.g. 2021-00001")?
        .build();
    let manual_btn = ElementBuilder::new("button")?
        .class("btn-manual")
        .text("Check in")
        .build();
    {
        let on_manual_submit = on_manual_submit.clone();
        on_click(&manual_btn, move |_| {
            submit_manual_entry(&on_manual_submit);
        })?;
    }
    on_keydown(&manual_input, move |e| {
        if e.key() == "Enter" {
            submit_manual_entry(&on_manual_submit);
        }
    })?;
    append_child(&manual, &manual_input)?;
    append_child(&manual, &manual_btn)?;
    append_child(&content, &manual)?;

    append_child(&modal, &content)?;

    Ok(modal)
}

fn submit_manual_entry(on_manual_submit: &Rc<dyn Fn(String)>) {
    if let Some(input) = manual_input() {
        let value = input.value();
        if !value.trim().is_empty() {
            on_manual_submit(value);
            input.set_value("");
        }
    }
}

fn manual_input() -> Option<HtmlInputElement> {
    get_element_by_id(MANUAL_INPUT_ID)?.dyn_into::<HtmlInputElement>().ok()
}

/// Show the feedback block for a settled attempt
pub fn show_feedback(overlay: &Overlay) -> Result<(), JsValue> {
    let Some(feedback) = get_element_by_id(FEEDBACK_ID) else {
        return Ok(());
    };

    set_inner_html(&feedback, "");

    let (class, icon, primary, secondary) = match overlay {
        Overlay::Success {
            student_name,
            student_number,
        } => (
            "scan-result success",
            "✅",
            student_name.clone(),
            student_number.clone(),
        ),
        Overlay::AlreadyCheckedIn {
            student_name,
            student_number,
        } => (
            "scan-result already",
            "ℹ️",
            format!("{} is already checked in", student_name),
            student_number.clone(),
        ),
        Overlay::Error { message } => (
            "scan-result error",
            "❌",
            message.clone(),
            String::new(),
        ),
    };

    set_class_name(&feedback, class);

    let icon_el = ElementBuilder::new("div")?.class("result-icon").text(icon).build();
    let text_el = ElementBuilder::new("div")?.class("result-text").build();
    let primary_el = ElementBuilder::new("div")?
        .class("result-primary")
        .text(&primary)
        .build();
    append_child(&text_el, &primary_el)?;
    if !secondary.is_empty() {
        let secondary_el = ElementBuilder::new("div")?
            .class("result-secondary")
            .text(&secondary)
            .build();
        append_child(&text_el, &secondary_el)?;
    }
    append_child(&feedback, &icon_el)?;
    append_child(&feedback, &text_el)?;

    Ok(())
}

/// Hide the feedback block and resume a clean viewport
pub fn clear_feedback() {
    if let Some(feedback) = get_element_by_id(FEEDBACK_ID) {
        set_class_name(&feedback, "scan-result hidden");
        set_inner_html(&feedback, "");
    }
}

/// Update the session success counter badge
pub fn set_counter(count: u32) {
    if let Some(counter) = get_element_by_id(COUNTER_ID) {
        set_text_content(&counter, &format!("{} checked in", count));
    }
}

pub fn show_camera_error() {
    if let Some(el) = get_element_by_id(CAMERA_ERROR_ID) {
        let _ = remove_class(&el, "hidden");
    }
}

pub fn hide_camera_error() {
    if let Some(el) = get_element_by_id(CAMERA_ERROR_ID) {
        let _ = add_class(&el, "hidden");
    }
}

/// Unmount the modal; safe when it is already gone
pub fn remove_scanner_modal() {
    if let Some(modal) = get_element_by_id(SCANNER_MODAL_ID) {
        modal.remove();
    }
}
