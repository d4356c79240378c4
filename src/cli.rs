use crate::config::Config;
use crate::error::ProbeResult;
use crate::probes::EXTENDED_PROBES;
use clap::Parser;

/// Command line flags; anything given here wins over the environment
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "familycal-probe",
    version,
    about = "Black-box API checks for the Family Calendar backend"
)]
pub struct Cli {
    /// Backend origin, without the /api prefix
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Only run the named probe (repeatable)
    #[arg(long = "probe", value_name = "NAME")]
    pub probes: Vec<String>,

    /// Also run the extended probes
    #[arg(long)]
    pub extended: bool,

    /// List probes and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Apply flag overrides to a loaded config
    pub fn apply(&self, config: &mut Config) -> ProbeResult<()> {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if self.extended {
            for name in EXTENDED_PROBES {
                config.set_probe_enabled(name, true)?;
            }
        }
        if !self.probes.is_empty() {
            let names: Vec<String> = config.probes.keys().cloned().collect();
            for name in names {
                config.set_probe_enabled(&name, false)?;
            }
            for name in &self.probes {
                config.set_probe_enabled(name, true)?;
            }
        }
        Ok(())
    }
}
