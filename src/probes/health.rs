use super::{Probe, ProbeOutcome, HEALTH_CHECK};
use crate::client::{ApiClient, ApiResponse};
use crate::error::{body_error, ProbeResult};
use crate::report;
use async_trait::async_trait;
use reqwest::StatusCode;

/// `GET /api/health` must answer 200 with `status: "ok"` and a timestamp
#[derive(Debug, Default)]
pub struct HealthCheckProbe;

impl HealthCheckProbe {
    pub fn new() -> Self {
        Self
    }

    /// Judge a health response
    pub fn check(response: &ApiResponse) -> ProbeResult<()> {
        response.expect_status(StatusCode::OK)?;

        let body = response.object()?;
        let status_ok = body.get("status").and_then(|s| s.as_str()) == Some("ok");
        if !status_ok || !body.contains_key("timestamp") {
            return Err(body_error(
                response.endpoint(),
                "expected status \"ok\" and a timestamp",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Probe for HealthCheckProbe {
    fn name(&self) -> &'static str {
        HEALTH_CHECK
    }

    fn title(&self) -> &'static str {
        "Health Check API"
    }

    async fn run(&self, client: &ApiClient) -> ProbeOutcome {
        let response = match client.get("health").await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Failed(e),
        };
        report::print_exchange(&response);

        match Self::check(&response) {
            Ok(()) => ProbeOutcome::Passed("Health check API working correctly".to_string()),
            Err(e) => ProbeOutcome::Failed(e),
        }
    }
}
