use super::{Probe, ProbeOutcome, PIN_VERIFICATION};
use crate::client::{ApiClient, ApiResponse};
use crate::error::{body_error, ProbeResult};
use crate::models::PinRequest;
use crate::report;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// `POST /api/verify-pin` must accept the right PIN and reject a wrong one
#[derive(Debug, Clone)]
pub struct PinVerificationProbe {
    correct_pin: String,
    incorrect_pin: String,
}

impl PinVerificationProbe {
    pub fn new(correct_pin: &str, incorrect_pin: &str) -> Self {
        Self {
            correct_pin: correct_pin.to_string(),
            incorrect_pin: incorrect_pin.to_string(),
        }
    }

    /// Accepted PIN: 200 and `success: true`
    pub fn check_accepted(response: &ApiResponse) -> ProbeResult<()> {
        response.expect_status(StatusCode::OK)?;
        if response.bool_field("success").ok() != Some(true) {
            return Err(body_error(
                response.endpoint(),
                "correct PIN should return success: true",
            ));
        }
        Ok(())
    }

    /// Rejected PIN: 401, `success: false` and a non-empty message
    pub fn check_rejected(response: &ApiResponse) -> ProbeResult<()> {
        response.expect_status(StatusCode::UNAUTHORIZED)?;
        let success = response.bool_field("success").ok();
        let message = response.str_field("message").unwrap_or("");
        if success != Some(false) || message.trim().is_empty() {
            return Err(body_error(
                response.endpoint(),
                "incorrect PIN should return success: false with a message",
            ));
        }
        Ok(())
    }

    async fn verify<F>(&self, client: &ApiClient, pin: &str, check: F) -> ProbeResult<()>
    where
        F: Fn(&ApiResponse) -> ProbeResult<()>,
    {
        let response = client.post_json("verify-pin", &PinRequest::new(pin)).await?;
        report::print_exchange(&response);
        check(&response)
    }
}

#[async_trait]
impl Probe for PinVerificationProbe {
    fn name(&self) -> &'static str {
        PIN_VERIFICATION
    }

    fn title(&self) -> &'static str {
        "PIN Verification API"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        report::print_subsection(&format!("Correct PIN ({})", self.correct_pin));
        let accepted = self
            .verify(client, &self.correct_pin, Self::check_accepted)
            .await;
        match &accepted {
            Ok(()) => report::print_pass("Correct PIN verification working"),
            Err(e) => report::print_fail(&format!("Correct PIN verification failed: {}", e)),
        }

        // Runs even when the first check failed
        report::print_subsection(&format!("Incorrect PIN ({})", self.incorrect_pin));
        let rejected = self
            .verify(client, &self.incorrect_pin, Self::check_rejected)
            .await;
        match &rejected {
            Ok(()) => report::print_pass("Incorrect PIN verification working"),
            Err(e) => report::print_fail(&format!("Incorrect PIN verification failed: {}", e)),
        }

        debug!(
            "PIN checks: accepted={}, rejected={}",
            accepted.is_ok(),
            rejected.is_ok()
        );

        match (accepted, rejected) {
            (Ok(()), Ok(())) => {
                ProbeOutcome::Passed("PIN verification API working correctly".to_string())
            }
            (Err(e), _) | (Ok(()), Err(e)) => ProbeOutcome::Failed(e),
        }
    }
}
