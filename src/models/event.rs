use serde::{Deserialize, Serialize};

/// Event being checked in, as served by the backend.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NexusEvent {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub venue: Option<String>,
    /// RFC 3339 start time
    #[serde(default)]
    pub starts_at: Option<String>,
}

/// One row of the attendance roster.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Participant {
    pub student_number: String,
    pub full_name: String,
    #[serde(default)]
    pub checked_in: bool,
    /// RFC 3339 check-in time, present once checked in
    #[serde(default)]
    pub checked_in_at: Option<String>,
}
