use serde::{Deserialize, Serialize};

/// Result of one completed check-in attempt, as seen by the scanner UI.
///
/// `Success` and `AlreadyCheckedIn` both identify the student; the other two
/// carry a message for the error overlay. Network failures and unknown
/// identifiers get the same visual treatment but are logged differently.
#[derive(Clone, PartialEq, Debug)]
pub enum CheckInOutcome {
    Success {
        student_name: String,
        student_number: String,
    },
    AlreadyCheckedIn {
        student_name: String,
        student_number: String,
    },
    NotFound {
        message: String,
    },
    NetworkError {
        message: String,
    },
}

impl CheckInOutcome {
    /// Whether this outcome counts toward the session success counter.
    pub fn is_success(&self) -> bool {
        matches!(self, CheckInOutcome::Success { .. })
    }
}

/// 2xx body of the check-in endpoint.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CheckInResponse {
    pub already_checked_in: bool,
    pub student_name: String,
    pub student_number: String,
}

impl CheckInResponse {
    pub fn into_outcome(self) -> CheckInOutcome {
        if self.already_checked_in {
            CheckInOutcome::AlreadyCheckedIn {
                student_name: self.student_name,
                student_number: self.student_number,
            }
        } else {
            CheckInOutcome::Success {
                student_name: self.student_name,
                student_number: self.student_number,
            }
        }
    }
}

/// 4xx body of the check-in endpoint.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_check_in_maps_to_success() {
        let response = CheckInResponse {
            already_checked_in: false,
            student_name: "Juan Dela Cruz".to_string(),
            student_number: "2021-00001".to_string(),
        };

        let outcome = response.into_outcome();
        assert!(outcome.is_success());
        assert_eq!(
            outcome,
            CheckInOutcome::Success {
                student_name: "Juan Dela Cruz".to_string(),
                student_number: "2021-00001".to_string(),
            }
        );
    }

    #[test]
    fn repeated_check_in_maps_to_already_checked_in() {
        let response = CheckInResponse {
            already_checked_in: true,
            student_name: "Juan Dela Cruz".to_string(),
            student_number: "2021-00001".to_string(),
        };

        let outcome = response.into_outcome();
        assert!(!outcome.is_success());
        assert!(matches!(outcome, CheckInOutcome::AlreadyCheckedIn { .. }));
    }

    #[test]
    fn error_body_parses_with_and_without_detail() {
        let with_detail: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Student not registered for this event"}"#).unwrap();
        assert_eq!(
            with_detail.detail.as_deref(),
            Some("Student not registered for this event")
        );

        let without_detail: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(without_detail.detail.is_none());
    }
}
