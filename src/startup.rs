use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Error, ProbeResult};
use crate::models::EventRequest;
use crate::probes::{
    AddEventValidationProbe, AddEventWithoutAuthProbe, AuthStatusProbe, GoogleAuthRedirectProbe,
    HealthCheckProbe, PinVerificationProbe, ProbeRunner, UnknownRouteProbe, ADD_EVENT_VALIDATION,
    ADD_EVENT_WITHOUT_AUTH, AUTH_STATUS, CORE_PROBES, EXTENDED_PROBES, GOOGLE_AUTH_REDIRECT,
    HEALTH_CHECK, PIN_VERIFICATION, UNKNOWN_ROUTE,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the config, apply command line overrides and validate the result
pub fn load_config(cli: &Cli) -> miette::Result<Config> {
    let config = Config::load().and_then(|mut config| {
        cli.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    });

    match config {
        Ok(config) => {
            info!("Checking backend at {}", config.api_base());
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Register every enabled probe in the fixed run order
pub fn build_runner(config: &Config) -> ProbeResult<ProbeRunner> {
    let mut runner = ProbeRunner::new();

    if config.is_probe_enabled(HEALTH_CHECK) {
        runner.register(HealthCheckProbe::new());
    }
    if config.is_probe_enabled(PIN_VERIFICATION) {
        runner.register(PinVerificationProbe::new(
            &config.correct_pin,
            &config.incorrect_pin,
        ));
    }
    if config.is_probe_enabled(AUTH_STATUS) {
        runner.register(AuthStatusProbe::new());
    }
    if config.is_probe_enabled(ADD_EVENT_WITHOUT_AUTH) {
        runner.register(AddEventWithoutAuthProbe::new(EventRequest::sample())?);
    }
    if config.is_probe_enabled(UNKNOWN_ROUTE) {
        runner.register(UnknownRouteProbe);
    }
    if config.is_probe_enabled(ADD_EVENT_VALIDATION) {
        runner.register(AddEventValidationProbe);
    }
    if config.is_probe_enabled(GOOGLE_AUTH_REDIRECT) {
        runner.register(GoogleAuthRedirectProbe);
    }

    Ok(runner)
}

/// Print every known probe with its enabled state
pub fn print_probe_list(config: &Config) {
    for name in CORE_PROBES.iter().chain(EXTENDED_PROBES.iter()) {
        let state = if config.is_probe_enabled(name) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{:<24} {}", name, state);
    }
}
