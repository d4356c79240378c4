//! Opt-in probes for the backend routes the core run leaves alone.

use super::{Probe, ProbeOutcome, ADD_EVENT_VALIDATION, GOOGLE_AUTH_REDIRECT, UNKNOWN_ROUTE};
use crate::client::{ApiClient, ApiResponse};
use crate::error::{body_error, Error, ProbeResult};
use crate::models::EventRequest;
use crate::report;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Prefix of the consent screen the backend redirects to
pub const GOOGLE_OAUTH_PREFIX: &str = "https://accounts.google.com/";

const UNKNOWN_PATH: &str = "this-route-does-not-exist";

fn into_outcome(result: ProbeResult<()>, message: &str) -> ProbeOutcome {
    match result {
        Ok(()) => ProbeOutcome::Passed(message.to_string()),
        Err(e) => ProbeOutcome::Failed(e),
    }
}

/// Unknown paths below `/api` answer 404 with an `error` field
#[derive(Debug, Default)]
pub struct UnknownRouteProbe;

impl UnknownRouteProbe {
    pub fn check(response: &ApiResponse) -> ProbeResult<()> {
        response.expect_status(StatusCode::NOT_FOUND)?;
        if !response.has_field("error") {
            return Err(body_error(response.endpoint(), "404 body has no 'error' field"));
        }
        Ok(())
    }
}

#[async_trait]
impl Probe for UnknownRouteProbe {
    fn name(&self) -> &'static str {
        UNKNOWN_ROUTE
    }

    fn title(&self) -> &'static str {
        "Unknown Route Handling"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        let response = match client.get(UNKNOWN_PATH).await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Failed(e),
        };
        report::print_exchange(&response);
        into_outcome(Self::check(&response), "Unknown routes return 404 as expected")
    }
}

/// `POST /api/add-event` without title and date is rejected with 400
#[derive(Debug, Default)]
pub struct AddEventValidationProbe;

impl AddEventValidationProbe {
    pub fn check(response: &ApiResponse) -> ProbeResult<()> {
        response.expect_status(StatusCode::BAD_REQUEST)?;
        let success = response.bool_field("success").ok();
        let message = response.str_field("message").unwrap_or("");
        if success != Some(false) || message.trim().is_empty() {
            return Err(body_error(
                response.endpoint(),
                "validation error should return success: false with a message",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Probe for AddEventValidationProbe {
    fn name(&self) -> &'static str {
        ADD_EVENT_VALIDATION
    }

    fn title(&self) -> &'static str {
        "Add Event Validation"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        let event = EventRequest::missing_required_fields();
        let response = match client.post_json("add-event", &event).await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Failed(e),
        };
        report::print_exchange(&response);
        into_outcome(
            Self::check(&response),
            "Add event API rejects events without title and date",
        )
    }
}

/// `GET /api/auth/google` redirects to Google's consent screen
#[derive(Debug, Default)]
pub struct GoogleAuthRedirectProbe;

impl GoogleAuthRedirectProbe {
    pub fn check(response: &ApiResponse) -> ProbeResult<()> {
        if !response.status().is_redirection() {
            return Err(Error::UnexpectedStatus {
                endpoint: response.endpoint().to_string(),
                expected: StatusCode::TEMPORARY_REDIRECT.as_u16(),
                actual: response.status().as_u16(),
            });
        }
        match response.location() {
            Some(location) if location.starts_with(GOOGLE_OAUTH_PREFIX) => Ok(()),
            Some(location) => Err(body_error(
                response.endpoint(),
                &format!("redirects to {} instead of Google", location),
            )),
            None => Err(body_error(response.endpoint(), "redirect without Location header")),
        }
    }
}

#[async_trait]
impl Probe for GoogleAuthRedirectProbe {
    fn name(&self) -> &'static str {
        GOOGLE_AUTH_REDIRECT
    }

    fn title(&self) -> &'static str {
        "Google OAuth Redirect"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        let response = match client.get_without_redirect("auth/google").await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Failed(e),
        };
        println!("Status Code: {}", response.status().as_u16());
        println!("Location: {}", response.location().unwrap_or("-"));
        into_outcome(
            Self::check(&response),
            "OAuth setup redirects to Google as expected",
        )
    }
}
