// ============================================================================
// PARTICIPANT LIST - Attendance roster rows
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::event::Participant;

/// Render the attendance roster
pub fn render_participant_list(participants: &[Participant]) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?.class("participant-list").build();

    if participants.is_empty() {
        let empty = ElementBuilder::new("div")?
            .class("empty-note")
            .text("No participants registered yet.")
            .build();
        append_child(&list, &empty)?;
        return Ok(list);
    }

    for participant in participants {
        let row_class = if participant.checked_in {
            "participant-row checked-in"
        } else {
            "participant-row"
        };
        let row = ElementBuilder::new("div")?.class(row_class).build();

        let name = ElementBuilder::new("div")?
            .class("participant-name")
            .text(&participant.full_name)
            .build();
        let number = ElementBuilder::new("div")?
            .class("participant-number")
            .text(&participant.student_number)
            .build();
        let status = ElementBuilder::new("div")?
            .class("participant-status")
            .text(&status_label(participant))
            .build();

        append_child(&row, &name)?;
        append_child(&row, &number)?;
        append_child(&row, &status)?;
        append_child(&list, &row)?;
    }

    Ok(list)
}

fn status_label(participant: &Participant) -> String {
    if !participant.checked_in {
        return "Registered".to_string();
    }
    match participant
        .checked_in_at
        .as_deref()
        .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
    {
        Some(time) => format!("Present · {}", time.format("%H:%M")),
        None => "Present".to_string(),
    }
}
