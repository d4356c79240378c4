use crate::error::{config_error, env_error, ProbeResult};
use crate::probes::{CORE_PROBES, EXTENDED_PROBES};
use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Deployment the checks run against unless overridden
pub const DEFAULT_BASE_URL: &str = "https://familycalendar-2.preview.emergentagent.com";
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// PIN the backend accepts out of the box
pub const DEFAULT_CORRECT_PIN: &str = "0312";
/// PIN the backend must reject
pub const DEFAULT_INCORRECT_PIN: &str = "1234";
/// Where probe toggles are read from
pub const DEFAULT_PROBE_CONFIG: &str = "config/probes.toml";

/// Runtime configuration for the probe run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, without the `/api` prefix
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout_secs: u64,
    /// PIN expected to be accepted
    pub correct_pin: String,
    /// PIN expected to be rejected
    pub incorrect_pin: String,
    /// Map of probe names to their enabled status
    pub probes: HashMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        let mut probes = HashMap::new();
        for name in CORE_PROBES {
            probes.insert(name.to_string(), true);
        }
        for name in EXTENDED_PROBES {
            probes.insert(name.to_string(), false);
        }

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            correct_pin: DEFAULT_CORRECT_PIN.to_string(),
            incorrect_pin: DEFAULT_INCORRECT_PIN.to_string(),
            probes,
        }
    }
}

impl Config {
    /// Load configuration from environment and the probe config file
    pub fn load() -> ProbeResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_vars(|key| env::var(key).ok())?;

        let probe_file =
            env::var("PROBE_CONFIG").unwrap_or_else(|_| DEFAULT_PROBE_CONFIG.to_string());
        config.merge_probe_file(Path::new(&probe_file))?;

        Ok(config)
    }

    /// Build a config from a variable lookup, falling back to defaults
    pub fn from_vars<F>(lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("FAMILYCAL_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup("PROBE_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| env_error("PROBE_TIMEOUT_SECS"))?;
        }
        if let Some(pin) = lookup("APP_PIN") {
            config.correct_pin = pin;
        }
        if let Some(pin) = lookup("PROBE_INCORRECT_PIN") {
            config.incorrect_pin = pin;
        }

        Ok(config)
    }

    /// Merge probe toggles from a TOML file, if it exists
    pub fn merge_probe_file(&mut self, path: &Path) -> ProbeResult<()> {
        if !path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(path)?;
        self.merge_probe_toml(&content)
    }

    /// Merge probe toggles from TOML text such as `unknown_route = true`
    pub fn merge_probe_toml(&mut self, content: &str) -> ProbeResult<()> {
        let file_probes = toml::from_str::<HashMap<String, bool>>(content)?;
        for (name, enabled) in file_probes {
            if !self.probes.contains_key(&name) {
                return Err(config_error(&format!("Unknown probe in config: {}", name)));
            }
            self.probes.insert(name, enabled);
        }
        Ok(())
    }

    /// Check that values are usable before any request is made
    pub fn validate(&self) -> ProbeResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| config_error(&format!("Invalid base URL {}: {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(config_error(&format!(
                "Base URL must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(config_error("Timeout must be at least one second"));
        }
        if self.correct_pin.is_empty() || self.incorrect_pin.is_empty() {
            return Err(config_error("PINs must not be empty"));
        }
        if self.correct_pin == self.incorrect_pin {
            return Err(config_error("Correct and incorrect PIN must differ"));
        }
        Ok(())
    }

    /// Base for every endpoint, e.g. `https://host/api`
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a probe is enabled
    pub fn is_probe_enabled(&self, name: &str) -> bool {
        *self.probes.get(name).unwrap_or(&false)
    }

    /// Update probe enabled status
    pub fn set_probe_enabled(&mut self, name: &str, enabled: bool) -> ProbeResult<()> {
        match self.probes.get_mut(name) {
            Some(slot) => {
                *slot = enabled;
                Ok(())
            }
            None => Err(config_error(&format!("Unknown probe: {}", name))),
        }
    }
}
