use super::{Probe, ProbeOutcome, ADD_EVENT_WITHOUT_AUTH};
use crate::client::{ApiClient, ApiResponse};
use crate::error::ProbeResult;
use crate::models::EventRequest;
use crate::report;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Marker the backend puts in its message when no refresh token is stored
pub const NOT_CONNECTED_MESSAGE: &str = "Google Calendar not connected";

/// `POST /api/add-event` without any Google credentials.
///
/// Documents current behaviour rather than gating it: every HTTP answer
/// passes, only a transport failure fails.
#[derive(Debug, Clone)]
pub struct AddEventWithoutAuthProbe {
    event: EventRequest,
}

impl Default for AddEventWithoutAuthProbe {
    fn default() -> Self {
        Self {
            event: EventRequest::sample(),
        }
    }
}

impl AddEventWithoutAuthProbe {
    /// Probe sending `event`, which must be well-formed
    pub fn new(event: EventRequest) -> ProbeResult<Self> {
        event.validate()?;
        Ok(Self { event })
    }

    /// Judge any HTTP answer; never fails
    pub fn evaluate(response: &ApiResponse) -> ProbeOutcome {
        if response.status() != StatusCode::UNAUTHORIZED {
            return ProbeOutcome::SoftPass(format!(
                "Add event API returned unexpected status {} (expected 401)",
                response.status().as_u16()
            ));
        }

        let rejected = response.bool_field("success").ok() == Some(false);
        let not_connected = response
            .str_field("message")
            .map(|m| m.contains(NOT_CONNECTED_MESSAGE))
            .unwrap_or(false);

        if rejected && not_connected {
            ProbeOutcome::Passed(
                "Add event API correctly returns auth error (expected behavior)".to_string(),
            )
        } else {
            ProbeOutcome::SoftPass("Add event API returned 401 but with unexpected message".to_string())
        }
    }
}

#[async_trait]
impl Probe for AddEventWithoutAuthProbe {
    fn name(&self) -> &'static str {
        ADD_EVENT_WITHOUT_AUTH
    }

    fn title(&self) -> &'static str {
        "Add Event API (Without Auth - Expected to Fail)"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        match client.post_json("add-event", &self.event).await {
            Ok(response) => {
                report::print_exchange(&response);
                Self::evaluate(&response)
            }
            Err(e) => ProbeOutcome::Failed(e),
        }
    }
}
