use clap::Parser;
use familycal_probe::cli::Cli;
use familycal_probe::client::ApiClient;
use familycal_probe::{report, startup};
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<ExitCode> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();

    // Load configuration
    let config = startup::load_config(&cli)?;

    if cli.list {
        startup::print_probe_list(&config);
        return Ok(ExitCode::SUCCESS);
    }

    let runner = startup::build_runner(&config)?;
    let client = ApiClient::new(&config)?;

    if runner.is_empty() {
        warn!("No probes enabled, nothing to check");
    } else {
        info!("Running {} probes", runner.names().len());
    }
    report::print_banner(&config);

    // Probes run one after another; failures are collected, never raised
    let summary = runner.run_all(&client).await;
    print!("{}", summary.render());

    Ok(ExitCode::from(summary.exit_status()))
}
