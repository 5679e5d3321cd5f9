// ============================================================================
// API CLIENT - HTTP communication only (stateless)
// ============================================================================
// No business logic here, just requests against the Nexus backend
// ============================================================================

use gloo_net::http::Request;

use crate::config::BACKEND_URL;
use crate::models::checkin::{ApiErrorBody, CheckInOutcome, CheckInResponse};
use crate::models::event::{NexusEvent, Participant};

/// API client, bearer-token authenticated.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(token: &str) -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            token: token.to_string(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Event header details
    pub async fn fetch_event(&self, event_id: u32) -> Result<NexusEvent, String> {
        let url = format!("{}/api/events/{}", self.base_url, event_id);

        let response = Request::get(&url)
            .header("Authorization", &self.bearer())
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP error {}: {}", status, error_text));
        }

        response
            .json::<NexusEvent>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Attendance roster for an event
    pub async fn fetch_attendance(&self, event_id: u32) -> Result<Vec<Participant>, String> {
        let url = format!("{}/api/events/{}/attendance", self.base_url, event_id);

        let response = Request::get(&url)
            .header("Authorization", &self.bearer())
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }

        let roster = response
            .json::<Vec<Participant>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        log::info!("📋 Roster loaded: {} participants", roster.len());

        Ok(roster)
    }

    /// Check a scanned identifier in against an event.
    ///
    /// Never fails outward: every response class maps to a CheckInOutcome.
    /// 2xx carries the already/new flag, 4xx means the identifier was not
    /// accepted, anything else (including transport failures) is a network
    /// error and is treated as transient by the scanner.
    pub async fn check_in(&self, event_id: u32, student_identifier: &str) -> CheckInOutcome {
        let url = format!(
            "{}/api/events/{}/attendance/check-in",
            self.base_url, event_id
        );
        let body = format!(
            "student_identifier={}",
            String::from(js_sys::encode_uri_component(student_identifier))
        );

        log::info!("📱 Checking in {} for event {}", student_identifier, event_id);

        let request = match Request::post(&url)
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
        {
            Ok(request) => request,
            Err(e) => {
                return CheckInOutcome::NetworkError {
                    message: format!("Request build error: {}", e),
                }
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ Check-in request failed: {}", e);
                return CheckInOutcome::NetworkError {
                    message: format!("Network error: {}", e),
                };
            }
        };

        let status = response.status();

        if response.ok() {
            return match response.json::<CheckInResponse>().await {
                Ok(body) => body.into_outcome(),
                Err(e) => CheckInOutcome::NetworkError {
                    message: format!("Parse error: {}", e),
                },
            };
        }

        if (400..500).contains(&status) {
            // Backend rejected the identifier; surface its message
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response.status_text()));
            log::warn!("⚠️ Check-in rejected: {}", message);
            return CheckInOutcome::NotFound { message };
        }

        log::error!("❌ Check-in failed with HTTP {}", status);
        CheckInOutcome::NetworkError {
            message: format!("HTTP {}: {}", status, response.status_text()),
        }
    }
}
