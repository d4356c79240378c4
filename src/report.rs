//! Console report: banner, per-probe lines and the final summary table.

use crate::client::ApiResponse;
use crate::config::Config;
use crate::probes::ProbeOutcome;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Print the run header
pub fn print_banner(config: &Config) {
    println!("🚀 Starting Family Calendar Backend API Tests");
    println!("Base URL: {}", config.base_url);
    println!("API Base: {}", config.api_base());
    println!("Timestamp: {}", chrono::Local::now().to_rfc3339());
}

/// Print the header that opens a probe
pub fn print_section(title: &str) {
    println!("\n=== Testing {} ===", title);
}

/// Print the header of one sub-check inside a probe
pub fn print_subsection(title: &str) {
    println!("\n--- Testing {} ---", title);
}

/// Print the status code and body of an exchange
pub fn print_exchange(response: &ApiResponse) {
    println!("Status Code: {}", response.status().as_u16());
    println!("Response: {}", response.display_body());
}

pub fn print_pass(message: &str) {
    println!("✅ {}", message);
}

pub fn print_warn(message: &str) {
    println!("⚠️ {}", message);
}

pub fn print_fail(message: &str) {
    println!("❌ {}", message);
}

/// Print the line matching an outcome
pub fn print_outcome(outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Passed(message) => print_pass(message),
        ProbeOutcome::SoftPass(message) => print_warn(message),
        ProbeOutcome::Failed(error) => print_fail(&error.to_string()),
    }
}

/// `add_event_without_auth` -> `Add Event Without Auth`
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Ordered record of every probe's outcome in one run
#[derive(Debug, Default)]
pub struct RunSummary {
    results: Vec<(String, ProbeOutcome)>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, outcome: ProbeOutcome) {
        self.results.push((name.to_string(), outcome));
    }

    pub fn results(&self) -> &[(String, ProbeOutcome)] {
        &self.results
    }

    /// Outcome of a probe by name
    pub fn get(&self, name: &str) -> Option<&ProbeOutcome> {
        self.results
            .iter()
            .find(|(probe, _)| probe == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, o)| o.is_pass()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Process exit status: 0 when every probe passed, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    /// Summary table as printed at the end of a run
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "🏁 TEST SUMMARY");
        let _ = writeln!(out, "{}", rule);

        for (name, outcome) in &self.results {
            let status = if outcome.is_pass() { "✅ PASS" } else { "❌ FAIL" };
            let _ = writeln!(out, "{}: {}", title_case(name), status);
        }

        let _ = writeln!(
            out,
            "\nOverall: {}/{} tests passed",
            self.passed(),
            self.total()
        );

        if self.all_passed() {
            let _ = writeln!(out, "🎉 All backend API tests passed!");
        } else {
            let _ = writeln!(out, "⚠️ Some tests failed - check details above");
        }

        out
    }
}
