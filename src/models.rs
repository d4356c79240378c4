use crate::error::{other_error, ProbeResult};
use crate::utils::time::{is_ordered, parse_date, parse_time};
use serde::{Deserialize, Serialize};

/// Body for `POST /api/verify-pin`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinRequest {
    pub pin: String,
}

impl PinRequest {
    pub fn new(pin: &str) -> Self {
        Self {
            pin: pin.to_string(),
        }
    }
}

/// Body for `POST /api/add-event`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    /// ISO date, YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub notes: String,
    pub is_all_day: bool,
}

impl EventRequest {
    /// Representative timed event used by the unauthenticated add-event check
    pub fn sample() -> Self {
        Self {
            title: "Test Family Event".to_string(),
            date: "2024-01-15".to_string(),
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            notes: "Test event for API validation".to_string(),
            is_all_day: false,
        }
    }

    /// Event without title or date; the backend must reject it before
    /// touching the calendar
    pub fn missing_required_fields() -> Self {
        Self {
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            ..Default::default()
        }
    }

    /// Check that the payload is well-formed before it goes on the wire
    pub fn validate(&self) -> ProbeResult<()> {
        if self.title.trim().is_empty() {
            return Err(other_error("Event title is empty"));
        }
        if parse_date(&self.date).is_none() {
            return Err(other_error(&format!("Invalid event date: {}", self.date)));
        }
        if self.is_all_day {
            return Ok(());
        }
        for time in [&self.start_time, &self.end_time] {
            if parse_time(time).is_none() {
                return Err(other_error(&format!("Invalid event time: {}", time)));
            }
        }
        if !is_ordered(&self.start_time, &self.end_time) {
            return Err(other_error("Event must end after it starts"));
        }
        Ok(())
    }
}
